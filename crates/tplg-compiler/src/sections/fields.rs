//! Field readers shared by the per-family builders.
//!
//! Each reader reports a diagnostic on the offending value and returns `None`,
//! so a builder can keep going and surface every problem of a declaration.

use rowan::TextRange;
use tplg_abi::NAME_MAXLEN;
use tplg_abi::format::IoOps;
use tplg_abi::format::names::{ACCESS_FLAGS, CONTROL_OPS, NameTable};
use tplg_core::utils::{find_similar, suggestion_distance};

use super::{SectionParser, article};
use crate::conf::ConfigNode;
use crate::diagnostics::DiagnosticKind;
use crate::store::{Ref, RefKind};

impl SectionParser<'_> {
    /// Names must fit a fixed name field with its terminating NUL.
    pub(super) fn check_name(&mut self, name: &str, range: TextRange) -> bool {
        if name.len() < NAME_MAXLEN {
            return true;
        }
        self.diagnostics
            .report(DiagnosticKind::NameTooLong, range)
            .message(name)
            .emit();
        false
    }

    pub(super) fn int_field(&mut self, node: &ConfigNode) -> Option<i64> {
        if let Some(value) = node.as_int() {
            return Some(value);
        }
        self.diagnostics
            .report(DiagnosticKind::ExpectedInteger, node.value_span())
            .message(format!("`{}` is {}", node.id(), article(node)))
            .emit();
        None
    }

    pub(super) fn u32_field(&mut self, node: &ConfigNode) -> Option<u32> {
        let value = self.int_field(node)?;
        self.fit(node, value)
    }

    pub(super) fn i32_field(&mut self, node: &ConfigNode) -> Option<i32> {
        let value = self.int_field(node)?;
        self.fit(node, value)
    }

    pub(super) fn u16_field(&mut self, node: &ConfigNode) -> Option<u16> {
        let value = self.int_field(node)?;
        self.fit(node, value)
    }

    pub(super) fn bool_field(&mut self, node: &ConfigNode) -> Option<bool> {
        if let Some(text) = node.as_str() {
            match text {
                "true" => return Some(true),
                "false" => return Some(false),
                _ => {}
            }
        }
        Some(self.int_field(node)? != 0)
    }

    fn fit<T: TryFrom<i64>>(&mut self, node: &ConfigNode, value: i64) -> Option<T> {
        if let Ok(value) = T::try_from(value) {
            return Some(value);
        }
        self.diagnostics
            .report(DiagnosticKind::InvalidValue, node.value_span())
            .message(format!("`{}` is out of range for `{}`", value, node.id()))
            .emit();
        None
    }

    pub(super) fn str_field<'n>(&mut self, node: &'n ConfigNode) -> Option<&'n str> {
        if let Some(text) = node.as_str() {
            return Some(text);
        }
        self.diagnostics
            .report(DiagnosticKind::ExpectedString, node.value_span())
            .message(format!("`{}` is {}", node.id(), article(node)))
            .emit();
        None
    }

    /// A string that ends up in a name field.
    pub(super) fn name_field(&mut self, node: &ConfigNode) -> Option<String> {
        let text = self.str_field(node)?;
        self.check_name(text, node.value_span()).then(|| text.to_string())
    }

    pub(super) fn compound_field<'n>(&mut self, node: &'n ConfigNode) -> Option<&'n [ConfigNode]> {
        if node.is_compound() && !node.is_array() {
            return Some(node.children());
        }
        self.diagnostics
            .report(DiagnosticKind::ExpectedCompound, node.value_span())
            .message(format!("`{}` is {}", node.id(), article(node)))
            .emit();
        None
    }

    /// Items of a single string or an array of strings, with their ranges.
    pub(super) fn string_items<'n>(&mut self, node: &'n ConfigNode) -> Vec<(&'n str, TextRange)> {
        if let Some(text) = node.as_str() {
            return vec![(text, node.value_span())];
        }
        if !node.is_array() {
            self.str_field(node);
            return Vec::new();
        }
        node.children()
            .iter()
            .filter_map(|item| {
                let text = self.str_field(item)?;
                Some((text, item.value_span()))
            })
            .collect()
    }

    /// One reference per named item.
    pub(super) fn refs_field(&mut self, node: &ConfigNode, kind: RefKind, refs: &mut Vec<Ref>) {
        for (name, range) in self.string_items(node) {
            if self.check_name(name, range) {
                refs.push(Ref::new(kind, name, range));
            }
        }
    }

    /// Value of a named table entry, or a plain number when `numeric` allows it.
    pub(super) fn lookup(&mut self, table: &NameTable, node: &ConfigNode, numeric: bool) -> Option<u32> {
        if numeric && let Some(value) = node.as_int() {
            return self.fit(node, value);
        }
        let text = self.str_field(node)?;
        self.lookup_name(table, text, node.value_span())
    }

    pub(super) fn lookup_name(&mut self, table: &NameTable, text: &str, range: TextRange) -> Option<u32> {
        if let Some(value) = table.lookup(text) {
            return Some(value);
        }
        let mut builder = self
            .diagnostics
            .report(DiagnosticKind::InvalidValue, range)
            .message(format!("unknown {} `{}`", table.what(), text));
        if let Some(similar) = find_similar(text, table.names(), suggestion_distance(text)) {
            builder = builder.hint(format!("did you mean `{}`?", similar));
        }
        builder.emit();
        None
    }

    /// `access [ read write ... ]`, OR-ed together.
    pub(super) fn access_field(&mut self, node: &ConfigNode) -> Option<u32> {
        let mut access = 0;
        let mut valid = true;
        for (name, range) in self.string_items(node) {
            match self.lookup_name(&ACCESS_FLAGS, name, range) {
                Some(bits) => access |= bits,
                None => valid = false,
            }
        }
        valid.then_some(access)
    }

    /// `ops."ctl" { info "volsw" get 256 put 256 }`.
    pub(super) fn ops_field(&mut self, node: &ConfigNode, ops: &mut IoOps) {
        let Some(groups) = self.compound_field(node) else {
            return;
        };
        for group in groups {
            let Some(handlers) = self.compound_field(group) else {
                continue;
            };
            for handler in handlers {
                let slot = match handler.id() {
                    "info" => &mut ops.info,
                    "get" => &mut ops.get,
                    "put" => &mut ops.put,
                    _ => continue,
                };
                if let Some(value) = self.lookup(&CONTROL_OPS, handler, true) {
                    *slot = value;
                }
            }
        }
    }

    /// The `index` every declaration accepts.
    pub(super) fn index_of(&mut self, decl: &ConfigNode) -> u32 {
        decl.get("index")
            .and_then(|node| self.u32_field(node))
            .unwrap_or(0)
    }

    pub(super) fn missing_field(&mut self, decl: &ConfigNode, field: &str) {
        self.diagnostics
            .report(DiagnosticKind::MissingField, decl.span())
            .message(field)
            .emit();
    }

    pub(super) fn too_many(&mut self, node: &ConfigNode, what: &str, count: usize, max: usize) {
        self.diagnostics
            .report(DiagnosticKind::TooManyItems, node.value_span())
            .message(format!("{} {}, at most {} allowed", count, what, max))
            .emit();
    }
}
