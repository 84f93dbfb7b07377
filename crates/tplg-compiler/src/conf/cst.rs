//! Syntax kinds for topology configuration text.
//!
//! One enum covers lexer tokens and parser nodes; only tokens carry `logos`
//! rules. [`ConfLang`] ties the enum to Rowan's tree types.

use logos::Logos;
use rowan::Language;

/// Token kinds first, node kinds after. Discriminants index [`KINDS`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("{")]
    BraceOpen = 0,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("=")]
    Equals,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    /// Key path separator: `SectionWidget."DAC"`
    #[token(".")]
    Dot,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    SingleQuote,
    /// String content between quotes, escapes not yet applied
    StrVal,

    /// Decimal or `0x` hexadecimal, optionally negative.
    #[regex(r"-?[0-9]+")]
    #[regex(r"-?0[xX][0-9a-fA-F]+")]
    Integer,

    /// Unquoted word.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-+:/]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Entry,
    Key,
    Atom,
    Compound,
    Array,
}

use SyntaxKind::*;

/// Every kind in discriminant order.
const KINDS: [SyntaxKind; 25] = [
    BraceOpen, BraceClose, BracketOpen, BracketClose, Equals, Semicolon, Comma, Dot,
    StringLiteral, DoubleQuote, SingleQuote, StrVal, Integer, Id, Whitespace, Newline, Comment,
    Garbage, Error, Root, Entry, Key, Atom, Compound, Array,
];

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | Comment)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfLang {}

impl Language for ConfLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Raw kinds only ever come from `kind_to_raw`.
        KINDS[usize::from(raw.0)]
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ConfLang>;
pub type SyntaxToken = rowan::SyntaxToken<ConfLang>;

/// Set of token kinds, one bit per discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u32);

const _: () = assert!(KINDS.len() <= 32);

impl TokenSet {
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u32;
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

/// FIRST sets and separators used by the grammar.
pub mod token_sets {
    use super::*;

    /// A key segment or scalar value.
    pub const ATOM_FIRST: TokenSet = TokenSet::new(&[Id, Integer, DoubleQuote, SingleQuote]);

    pub const VALUE_FIRST: TokenSet = ATOM_FIRST.union(TokenSet::new(&[BraceOpen, BracketOpen]));

    pub const SEPARATORS: TokenSet = TokenSet::new(&[Semicolon, Comma]);
}
