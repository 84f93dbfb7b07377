use tplg_abi::format::NUM_TEXTS;

use super::{SectionParser, insert};
use crate::conf::ConfigNode;
use crate::store::{Element, TextList};

impl SectionParser<'_> {
    /// `SectionText."name" { values [ "On" "Off" ] }`
    pub(super) fn parse_text(&mut self, decl: &ConfigNode) {
        let Some(values) = decl.get("values") else {
            self.missing_field(decl, "values");
            return;
        };

        let items = self.string_items(values);
        if items.len() > NUM_TEXTS {
            self.too_many(values, "texts", items.len(), NUM_TEXTS);
            return;
        }
        let mut list = TextList::default();
        for (value, range) in items {
            if self.check_name(value, range) {
                list.values.push(value.to_string());
            }
        }

        tracing::debug!(name = decl.id(), count = list.values.len(), "parsed text");
        let element = Element::new(decl.id(), decl.span(), list).with_index(self.index_of(decl));
        insert(&mut self.store.texts, &mut self.diagnostics, element);
    }
}
