//! Mixer, enumerated and bytes controls.

use tplg_abi::format::names::{ACCESS_DEFAULT, ACCESS_TLV_READ, CHANNELS};
use tplg_abi::format::{BytesControl, Channel, EnumControl, MAX_CHAN, MixerControl};

use super::{SectionParser, insert};
use crate::conf::ConfigNode;
use crate::store::{Element, Ref, RefKind};

impl SectionParser<'_> {
    pub(super) fn parse_mixer(&mut self, decl: &ConfigNode) {
        let mut mixer = MixerControl::default();
        mixer.hdr.name = decl.id().to_string();
        let mut refs = Vec::new();
        let mut access = None;
        let mut platform_max = None;

        for field in decl.children() {
            match field.id() {
                "channel" => mixer.channels = self.channels_field(field),
                "ops" => self.ops_field(field, &mut mixer.hdr.ops),
                "min" => mixer.min = self.i32_field(field).unwrap_or(mixer.min),
                "max" => mixer.max = self.i32_field(field).unwrap_or(mixer.max),
                "platform_max" => platform_max = self.i32_field(field),
                "invert" => mixer.invert = self.bool_field(field).map_or(0, u32::from),
                "access" => access = self.access_field(field),
                "tlv" => self.single_ref(field, RefKind::Tlv, &mut refs),
                "data" => self.single_ref(field, RefKind::Data, &mut refs),
                _ => {}
            }
        }

        mixer.platform_max = platform_max.unwrap_or(mixer.max);
        let has_tlv = refs.iter().any(|r| r.kind == RefKind::Tlv);
        mixer.hdr.access = access.unwrap_or(if has_tlv {
            ACCESS_DEFAULT | ACCESS_TLV_READ
        } else {
            ACCESS_DEFAULT
        });

        tracing::debug!(name = decl.id(), channels = mixer.channels.len(), "parsed mixer control");
        let element = Element::new(decl.id(), decl.span(), mixer)
            .with_index(self.index_of(decl))
            .with_refs(refs);
        insert(&mut self.store.mixers, &mut self.diagnostics, element);
    }

    pub(super) fn parse_enum(&mut self, decl: &ConfigNode) {
        let mut control = EnumControl::default();
        control.hdr.name = decl.id().to_string();
        control.hdr.access = ACCESS_DEFAULT;
        let mut refs = Vec::new();

        for field in decl.children() {
            match field.id() {
                "channel" => control.channels = self.channels_field(field),
                "ops" => self.ops_field(field, &mut control.hdr.ops),
                "mask" => control.mask = self.u32_field(field).unwrap_or(control.mask),
                "access" => {
                    if let Some(access) = self.access_field(field) {
                        control.hdr.access = access;
                    }
                }
                "texts" => self.single_ref(field, RefKind::Text, &mut refs),
                "data" => self.single_ref(field, RefKind::Data, &mut refs),
                _ => {}
            }
        }

        tracing::debug!(name = decl.id(), "parsed enum control");
        let element = Element::new(decl.id(), decl.span(), control)
            .with_index(self.index_of(decl))
            .with_refs(refs);
        insert(&mut self.store.enums, &mut self.diagnostics, element);
    }

    pub(super) fn parse_bytes(&mut self, decl: &ConfigNode) {
        let mut control = BytesControl::default();
        control.hdr.name = decl.id().to_string();
        control.hdr.access = ACCESS_DEFAULT;
        let mut refs = Vec::new();

        for field in decl.children() {
            match field.id() {
                "ops" => self.ops_field(field, &mut control.hdr.ops),
                "extops" => self.ops_field(field, &mut control.ext_ops),
                "base" => control.base = self.u32_field(field).unwrap_or(control.base),
                "num_regs" => control.num_regs = self.u32_field(field).unwrap_or(control.num_regs),
                "mask" => control.mask = self.u32_field(field).unwrap_or(control.mask),
                "max" => control.max = self.u32_field(field).unwrap_or(control.max),
                "access" => {
                    if let Some(access) = self.access_field(field) {
                        control.hdr.access = access;
                    }
                }
                "data" => self.single_ref(field, RefKind::Data, &mut refs),
                _ => {}
            }
        }

        tracing::debug!(name = decl.id(), "parsed bytes control");
        let element = Element::new(decl.id(), decl.span(), control)
            .with_index(self.index_of(decl))
            .with_refs(refs);
        insert(&mut self.store.bytes, &mut self.diagnostics, element);
    }

    /// `channel."FL" { reg 2 shift 0 }`, one entry per channel.
    fn channels_field(&mut self, node: &ConfigNode) -> Vec<Channel> {
        let Some(entries) = self.compound_field(node) else {
            return Vec::new();
        };
        if entries.len() > MAX_CHAN {
            self.too_many(node, "channels", entries.len(), MAX_CHAN);
            return Vec::new();
        }

        let mut channels = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(id) = self.lookup_name(&CHANNELS, entry.id(), entry.span()) else {
                continue;
            };
            let mut channel = Channel {
                id,
                ..Channel::default()
            };
            if let Some(fields) = self.compound_field(entry) {
                for field in fields {
                    match field.id() {
                        "reg" => channel.reg = self.i32_field(field).unwrap_or(channel.reg),
                        "shift" => channel.shift = self.i32_field(field).unwrap_or(channel.shift),
                        _ => {}
                    }
                }
            }
            channels.push(channel);
        }
        channels
    }

    /// A field naming exactly one other declaration.
    pub(super) fn single_ref(&mut self, node: &ConfigNode, kind: RefKind, refs: &mut Vec<Ref>) {
        let Some(name) = self.str_field(node) else {
            return;
        };
        if self.check_name(name, node.value_span()) {
            refs.push(Ref::new(kind, name, node.value_span()));
        }
    }
}
