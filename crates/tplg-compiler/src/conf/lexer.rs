//! Lexer for topology configuration text.
//!
//! Tokens carry a kind and a span only; text is sliced from the source on
//! demand. A run of characters no rule matches becomes one `Garbage` token.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

/// Kind and source span of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    fn at(kind: SyntaxKind, range: Range<usize>) -> Self {
        let span = TextRange::new(
            TextSize::from(range.start as u32),
            TextSize::from(range.end as u32),
        );
        Self::new(kind, span)
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage: Option<Range<usize>> = None;

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        let Ok(kind) = result else {
            // Extend the pending garbage run.
            let start = garbage.map_or(span.start, |run| run.start);
            garbage = Some(start..span.end);
            continue;
        };
        if let Some(run) = garbage.take() {
            tokens.push(Token::at(SyntaxKind::Garbage, run));
        }
        if kind == SyntaxKind::StringLiteral {
            push_string(source, span, &mut tokens);
        } else {
            tokens.push(Token::at(kind, span));
        }
    }
    if let Some(run) = garbage {
        tokens.push(Token::at(SyntaxKind::Garbage, run));
    }

    tokens
}

/// A quoted string becomes opening quote, optional `StrVal`, closing quote.
fn push_string(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let quote = match source.as_bytes()[span.start] {
        b'"' => SyntaxKind::DoubleQuote,
        _ => SyntaxKind::SingleQuote,
    };
    let Range { start, end } = span;

    tokens.push(Token::at(quote, start..start + 1));
    if end - start > 2 {
        tokens.push(Token::at(SyntaxKind::StrVal, start + 1..end - 1));
    }
    tokens.push(Token::at(quote, end - 1..end));
}

pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[Range::<usize>::from(token.span)]
}
