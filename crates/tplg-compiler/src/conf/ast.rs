//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            /// Range without leading trivia.
            pub fn text_range(&self) -> TextRange {
                trimmed_range(&self.0)
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Entry, Entry);
ast_node!(Key, Key);
ast_node!(Atom, Atom);
ast_node!(Compound, Compound);
ast_node!(Array, Array);

/// Right-hand side of an entry or an array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Atom(Atom),
    Compound(Compound),
    Array(Array),
}

impl Value {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Atom => Atom::cast(node).map(Value::Atom),
            SyntaxKind::Compound => Compound::cast(node).map(Value::Compound),
            SyntaxKind::Array => Array::cast(node).map(Value::Array),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Value::Atom(n) => n.as_cst(),
            Value::Compound(n) => n.as_cst(),
            Value::Array(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        trimmed_range(self.as_cst())
    }
}

/// Scalar content of an atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Unquoted word.
    Word(String),
    /// Integer literal text, not yet range-checked.
    Integer(String),
    /// Quoted string with escapes applied.
    Str(String),
}

impl Scalar {
    /// Text as used for keys and ids.
    pub fn as_text(&self) -> &str {
        match self {
            Scalar::Word(s) | Scalar::Integer(s) | Scalar::Str(s) => s,
        }
    }
}

impl Root {
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.children().filter_map(Entry::cast)
    }
}

impl Entry {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl Key {
    /// Path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = Atom> + '_ {
        self.0.children().filter_map(Atom::cast)
    }
}

impl Compound {
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.children().filter_map(Entry::cast)
    }
}

impl Array {
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.children().filter_map(Value::cast)
    }
}

impl Atom {
    fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
    }

    pub fn scalar(&self) -> Option<Scalar> {
        let first = self.tokens().next()?;
        match first.kind() {
            SyntaxKind::Id => Some(Scalar::Word(first.text().to_string())),
            SyntaxKind::Integer => Some(Scalar::Integer(first.text().to_string())),
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => {
                let content = self
                    .tokens()
                    .find(|t| t.kind() == SyntaxKind::StrVal)
                    .map(|t| unescape(t.text()))
                    .unwrap_or_default();
                Some(Scalar::Str(content))
            }
            _ => None,
        }
    }
}

/// Applies `\" \' \\ \n \t`; any other escaped char stands for itself.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn trimmed_range(node: &SyntaxNode) -> TextRange {
    let mut tokens = node
        .descendants_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| !t.kind().is_trivia());
    let Some(first) = tokens.next() else {
        return node.text_range();
    };
    let last = tokens.last().unwrap_or_else(|| first.clone());
    TextRange::new(first.text_range().start(), last.text_range().end())
}
