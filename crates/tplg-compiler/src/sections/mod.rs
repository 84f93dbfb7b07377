//! Section parser: top-level sections to typed elements in the [`Store`].
//!
//! Each recognized section holds one compound per declaration; the compound's
//! id names the element. Named references to other declarations are recorded
//! on the element and resolved later by the linker, so declarations may appear
//! in any order.

mod ctl;
mod dapm;
mod data;
mod fields;
mod pcm;
mod text;
mod tlv;

#[cfg(test)]
mod dapm_tests;
#[cfg(test)]
mod pcm_tests;
#[cfg(test)]
mod sections_tests;

use std::path::Path;

use crate::conf::ConfigNode;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::store::{Collection, Element, Store};

/// Top-level section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Tlv,
    ControlMixer,
    ControlEnum,
    ControlBytes,
    Widget,
    PcmConfig,
    PcmCapabilities,
    Pcm,
    Backend,
    CodecLink,
    Graph,
    Text,
    Data,
}

const SECTIONS: &[(&str, SectionKind)] = &[
    ("SectionTLV", SectionKind::Tlv),
    ("SectionControlMixer", SectionKind::ControlMixer),
    ("SectionControlEnum", SectionKind::ControlEnum),
    ("SectionControlBytes", SectionKind::ControlBytes),
    ("SectionWidget", SectionKind::Widget),
    ("SectionPCMConfig", SectionKind::PcmConfig),
    ("SectionPCMCapabilities", SectionKind::PcmCapabilities),
    ("SectionPCM", SectionKind::Pcm),
    ("SectionBE", SectionKind::Backend),
    ("SectionCC", SectionKind::CodecLink),
    ("SectionGraph", SectionKind::Graph),
    ("SectionText", SectionKind::Text),
    ("SectionData", SectionKind::Data),
];

impl SectionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        SECTIONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, kind)| kind)
    }

    pub fn name(self) -> &'static str {
        SECTIONS
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(n, _)| n)
            .unwrap_or_default()
    }

    pub fn all() -> impl Iterator<Item = SectionKind> {
        SECTIONS.iter().map(|&(_, kind)| kind)
    }
}

/// Interprets every top-level section of `root` into `store`.
///
/// `base_dir` resolves relative `file` paths of private data; without it they
/// are taken relative to the working directory.
pub fn parse_sections(root: &ConfigNode, base_dir: Option<&Path>, store: &mut Store) -> Diagnostics {
    let mut parser = SectionParser {
        store,
        diagnostics: Diagnostics::new(),
        base_dir,
    };
    for section in root.children() {
        parser.parse_section(section);
    }
    parser.diagnostics
}

pub(crate) struct SectionParser<'a> {
    store: &'a mut Store,
    diagnostics: Diagnostics,
    base_dir: Option<&'a Path>,
}

impl SectionParser<'_> {
    fn parse_section(&mut self, section: &ConfigNode) {
        let Some(kind) = SectionKind::from_name(section.id()) else {
            tracing::warn!(section = section.id(), "skipping unknown section");
            let mut builder = self
                .diagnostics
                .report(DiagnosticKind::UnknownSection, section.span())
                .message(section.id());
            let names = SECTIONS.iter().map(|&(n, _)| n);
            let max_dist = tplg_core::utils::suggestion_distance(section.id());
            if let Some(similar) = tplg_core::utils::find_similar(section.id(), names, max_dist) {
                builder = builder.hint(format!("did you mean `{}`?", similar));
            }
            builder.emit();
            return;
        };

        if !section.is_compound() || section.is_array() {
            self.diagnostics
                .report(DiagnosticKind::ExpectedCompound, section.value_span())
                .message(format!("section `{}` is {}", section.id(), article(section)))
                .emit();
            return;
        }

        for decl in section.children() {
            if !decl.is_compound() || decl.is_array() {
                self.diagnostics
                    .report(DiagnosticKind::ExpectedCompound, decl.span())
                    .message(format!("declaration `{}` in `{}` is {}", decl.id(), kind.name(), article(decl)))
                    .emit();
                continue;
            }
            if !self.check_name(decl.id(), decl.span()) {
                continue;
            }
            match kind {
                SectionKind::Tlv => self.parse_tlv(decl),
                SectionKind::ControlMixer => self.parse_mixer(decl),
                SectionKind::ControlEnum => self.parse_enum(decl),
                SectionKind::ControlBytes => self.parse_bytes(decl),
                SectionKind::Widget => self.parse_widget(decl),
                SectionKind::PcmConfig => self.parse_pcm_config(decl),
                SectionKind::PcmCapabilities => self.parse_pcm_caps(decl),
                SectionKind::Pcm | SectionKind::Backend | SectionKind::CodecLink => {
                    self.parse_pcm_dai(kind, decl)
                }
                SectionKind::Graph => self.parse_graph(decl),
                SectionKind::Text => self.parse_text(decl),
                SectionKind::Data => self.parse_data(decl),
            }
        }
    }
}

/// Adds a declaration, reporting a clash with an earlier one of the same family.
fn insert<T>(collection: &mut Collection<T>, diagnostics: &mut Diagnostics, element: Element<T>) {
    let Err(element) = collection.insert(element) else {
        return;
    };
    let mut builder = diagnostics
        .report(DiagnosticKind::DuplicateDefinition, element.span)
        .message(&element.name);
    if let Some(first) = collection.get(&element.name) {
        builder = builder.related_to(format!("first {} declared here", collection.kind()), first.span);
    }
    builder.emit();
}

/// "a string", "an integer", ...
fn article(node: &ConfigNode) -> String {
    let name = node.type_name();
    let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) { "an" } else { "a" };
    format!("{} {}", article, name)
}
