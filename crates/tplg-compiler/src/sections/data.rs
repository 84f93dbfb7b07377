use std::path::PathBuf;

use super::{SectionParser, insert};
use crate::conf::{ConfigNode, parse_int};
use crate::diagnostics::DiagnosticKind;
use crate::store::{Element, PrivateData};

/// Value sources of a `SectionData` declaration, with their element width.
const SOURCES: &[(&str, usize)] = &[("bytes", 1), ("shorts", 2), ("words", 4), ("file", 0)];

impl SectionParser<'_> {
    /// `SectionData."name" { bytes "0x12,0x34" }`, `shorts`, `words` or `file`.
    pub(super) fn parse_data(&mut self, decl: &ConfigNode) {
        let sources: Vec<(&ConfigNode, usize)> = SOURCES
            .iter()
            .filter_map(|&(id, width)| Some((decl.get(id)?, width)))
            .collect();
        let [(node, width)] = sources[..] else {
            if sources.is_empty() {
                self.missing_field(decl, "bytes");
            } else {
                self.diagnostics
                    .report(DiagnosticKind::InvalidValue, decl.span())
                    .message("only one of `bytes`, `shorts`, `words` or `file` may be given")
                    .emit();
            }
            return;
        };

        let bytes = if width == 0 {
            self.read_file(node)
        } else {
            self.hex_list(node, width)
        };
        let Some(bytes) = bytes else {
            return;
        };

        tracing::debug!(name = decl.id(), size = bytes.len(), "parsed private data");
        let element = Element::new(decl.id(), decl.span(), PrivateData { bytes })
            .with_index(self.index_of(decl));
        insert(&mut self.store.data, &mut self.diagnostics, element);
    }

    fn read_file(&mut self, node: &ConfigNode) -> Option<Vec<u8>> {
        let path = self.str_field(node)?;
        let full: PathBuf = match self.base_dir {
            Some(dir) => dir.join(path),
            None => PathBuf::from(path),
        };
        match std::fs::read(&full) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.diagnostics
                    .report(DiagnosticKind::UnreadableFile, node.value_span())
                    .message(format!("`{}`: {}", full.display(), err))
                    .emit();
                None
            }
        }
    }

    /// Comma separated integers, each stored little-endian in `width` bytes.
    fn hex_list(&mut self, node: &ConfigNode, width: usize) -> Option<Vec<u8>> {
        let text = self.str_field(node)?;
        match encode_list(text, width) {
            Ok(bytes) => Some(bytes),
            Err(item) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidValue, node.value_span())
                    .message(format!("`{}` is not a {}-byte value", item, width))
                    .emit();
                None
            }
        }
    }
}

/// Encodes `"0x12,0x34"`; the offending item is returned on failure.
pub(crate) fn encode_list(text: &str, width: usize) -> Result<Vec<u8>, String> {
    let max = if width >= 8 { u64::MAX } else { (1u64 << (width * 8)) - 1 };
    let mut bytes = Vec::new();
    for item in text.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let value = parse_int(item)
            .and_then(|n| u64::try_from(n).ok())
            .filter(|&n| n <= max)
            .ok_or_else(|| item.to_string())?;
        bytes.extend_from_slice(&value.to_le_bytes()[..width]);
    }
    Ok(bytes)
}
