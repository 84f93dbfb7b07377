//! Owned configuration tree consumed by the section parser.
//!
//! Lowering applies the merge rules: compounds with the same id at the same
//! level are merged, a repeated scalar replaces the earlier value, and a dotted
//! key `a.b c` is the same as `a { b c }`.

use rowan::TextRange;

use super::ast::{self, Scalar};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Integer(i64),
    String(String),
    Compound(Vec<ConfigNode>),
    /// Elements carry the ids `"0"`, `"1"`, ...
    Array(Vec<ConfigNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNode {
    id: String,
    /// Range of the id in the source (the key segment, or the element for arrays).
    span: TextRange,
    value_span: TextRange,
    value: ConfigValue,
}

impl ConfigNode {
    pub fn new(id: impl Into<String>, span: TextRange, value_span: TextRange, value: ConfigValue) -> Self {
        Self {
            id: id.into(),
            span,
            value_span,
            value,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn span(&self) -> TextRange {
        self.span
    }

    pub fn value_span(&self) -> TextRange {
        self.value_span
    }

    pub fn value(&self) -> &ConfigValue {
        &self.value
    }

    /// Children of a compound or array, empty for scalars.
    pub fn children(&self) -> &[ConfigNode] {
        self.as_compound().unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&ConfigNode> {
        self.children().iter().find(|c| c.id == id)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer leaves, or strings holding a decimal or `0x` hex integer.
    pub fn as_int(&self) -> Option<i64> {
        match &self.value {
            ConfigValue::Integer(n) => Some(*n),
            ConfigValue::String(s) => parse_int(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&[ConfigNode]> {
        match &self.value {
            ConfigValue::Compound(children) | ConfigValue::Array(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_compound(&self) -> bool {
        self.as_compound().is_some()
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, ConfigValue::Array(_))
    }

    /// A single string, or an array of strings.
    pub fn string_list(&self) -> Option<Vec<&str>> {
        match &self.value {
            ConfigValue::String(s) => Some(vec![s.as_str()]),
            ConfigValue::Array(items) => items.iter().map(ConfigNode::as_str).collect(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.value {
            ConfigValue::Integer(_) => "integer",
            ConfigValue::String(_) => "string",
            ConfigValue::Compound(_) => "compound",
            ConfigValue::Array(_) => "array",
        }
    }
}

/// Parses `42`, `-9000`, `0x1f` and `-0x10`.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Lowers the syntax tree into the root compound (id `""`).
pub fn lower(root: &ast::Root) -> (ConfigNode, Diagnostics) {
    let mut lowering = Lowering {
        diagnostics: Diagnostics::new(),
    };
    let mut children = Vec::new();
    for entry in root.entries() {
        lowering.lower_entry(&entry, &mut children);
    }
    let range = root.as_cst().text_range();
    let node = ConfigNode::new("", TextRange::empty(range.start()), range, ConfigValue::Compound(children));
    (node, lowering.diagnostics)
}

struct Lowering {
    diagnostics: Diagnostics,
}

impl Lowering {
    fn lower_entry(&mut self, entry: &ast::Entry, siblings: &mut Vec<ConfigNode>) {
        let Some(key) = entry.key() else {
            return;
        };
        let path: Vec<(String, TextRange)> = key
            .segments()
            .filter_map(|atom| Some((atom.scalar()?.as_text().to_string(), atom.text_range())))
            .collect();
        let Some(value) = entry.value() else {
            return;
        };
        if path.is_empty() {
            return;
        }

        let value_span = value.text_range();
        let value = self.lower_value(&value);
        insert_path(siblings, &path, value_span, value, entry.text_range());
    }

    fn lower_value(&mut self, value: &ast::Value) -> ConfigValue {
        match value {
            ast::Value::Atom(atom) => self.lower_atom(atom),
            ast::Value::Compound(compound) => {
                let mut children = Vec::new();
                for entry in compound.entries() {
                    self.lower_entry(&entry, &mut children);
                }
                ConfigValue::Compound(children)
            }
            ast::Value::Array(array) => {
                let items = array
                    .values()
                    .enumerate()
                    .map(|(i, item)| {
                        let range = item.text_range();
                        ConfigNode::new(i.to_string(), range, range, self.lower_value(&item))
                    })
                    .collect();
                ConfigValue::Array(items)
            }
        }
    }

    fn lower_atom(&mut self, atom: &ast::Atom) -> ConfigValue {
        match atom.scalar() {
            Some(Scalar::Integer(text)) => match parse_int(&text) {
                Some(n) => ConfigValue::Integer(n),
                None => {
                    self.diagnostics
                        .report(DiagnosticKind::InvalidValue, atom.text_range())
                        .message(format!("integer `{}` is out of range", text))
                        .emit();
                    ConfigValue::String(text)
                }
            },
            Some(Scalar::Word(text)) | Some(Scalar::Str(text)) => ConfigValue::String(text),
            None => ConfigValue::String(String::new()),
        }
    }
}

fn insert_path(
    siblings: &mut Vec<ConfigNode>,
    path: &[(String, TextRange)],
    value_span: TextRange,
    value: ConfigValue,
    entry_span: TextRange,
) {
    let [(id, span), rest @ ..] = path else {
        return;
    };
    if rest.is_empty() {
        insert_node(siblings, ConfigNode::new(id.clone(), *span, value_span, value));
        return;
    }

    let pos = match siblings.iter().position(|c| &c.id == id) {
        Some(pos) if matches!(siblings[pos].value, ConfigValue::Compound(_)) => pos,
        Some(pos) => {
            siblings[pos] = ConfigNode::new(id.clone(), *span, entry_span, ConfigValue::Compound(Vec::new()));
            pos
        }
        None => {
            siblings.push(ConfigNode::new(id.clone(), *span, entry_span, ConfigValue::Compound(Vec::new())));
            siblings.len() - 1
        }
    };
    if let ConfigValue::Compound(children) = &mut siblings[pos].value {
        insert_path(children, rest, value_span, value, entry_span);
    }
}

fn insert_node(siblings: &mut Vec<ConfigNode>, node: ConfigNode) {
    let Some(existing) = siblings.iter_mut().find(|c| c.id == node.id) else {
        siblings.push(node);
        return;
    };
    match (&mut existing.value, node.value) {
        (ConfigValue::Compound(children), ConfigValue::Compound(incoming)) => {
            for child in incoming {
                insert_node(children, child);
            }
        }
        (_, value) => {
            existing.span = node.span;
            existing.value_span = node.value_span;
            existing.value = value;
        }
    }
}
