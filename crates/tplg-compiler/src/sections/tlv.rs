use tplg_abi::format::DbScale;

use super::{SectionParser, insert};
use crate::conf::ConfigNode;
use crate::store::Element;

impl SectionParser<'_> {
    /// `SectionTLV."name" { scale { min -9000 step 300 mute 1 } }`
    pub(super) fn parse_tlv(&mut self, decl: &ConfigNode) {
        let Some(scale) = decl.get("scale") else {
            self.missing_field(decl, "scale");
            return;
        };
        let Some(fields) = self.compound_field(scale) else {
            return;
        };

        let mut db = DbScale::default();
        for field in fields {
            match field.id() {
                "min" => {
                    if let Some(min) = self.i32_field(field) {
                        db.min = min;
                    }
                }
                "step" => {
                    if let Some(step) = self.u16_field(field) {
                        db.step = u32::from(step);
                    }
                }
                "mute" => {
                    if let Some(mute) = self.bool_field(field) {
                        db.mute = mute;
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(name = decl.id(), min = db.min, step = db.step, "parsed TLV");
        let element = Element::new(decl.id(), decl.span(), db).with_index(self.index_of(decl));
        insert(&mut self.store.tlvs, &mut self.diagnostics, element);
    }
}
