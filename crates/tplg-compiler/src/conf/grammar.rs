//! Grammar productions for configuration text.
//!
//! ```text
//! root     = entry*
//! entry    = key "="? value (";" | ",")?
//! key      = atom ("." atom)*
//! value    = atom | compound | array
//! compound = "{" entry* "}"
//! array    = "[" (value (";" | ",")?)* "]"
//! atom     = Id | Integer | string
//! ```

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{ATOM_FIRST, SEPARATORS, VALUE_FIRST};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.open_node(SyntaxKind::Root);

        while !self.done() {
            if self.at_any(ATOM_FIRST) {
                self.parse_entry();
                continue;
            }
            let message = format!("expected a key, found `{}`", self.current_text());
            self.recover(DiagnosticKind::UnexpectedToken, &message, ATOM_FIRST);
        }

        self.take_trivia();
        self.close_node();
    }

    /// `key [=] value [;|,]`
    fn parse_entry(&mut self) {
        self.open_node(SyntaxKind::Entry);
        self.parse_key();
        self.eat(SyntaxKind::Equals);

        if self.at_any(VALUE_FIRST) {
            self.parse_value();
        } else {
            self.report(DiagnosticKind::ExpectedValue, None);
        }

        if self.at_any(SEPARATORS) {
            self.bump();
        }
        self.close_node();
    }

    /// Dotted path: `SectionWidget."DAC".type`
    fn parse_key(&mut self) {
        self.open_node(SyntaxKind::Key);
        self.parse_atom();
        while self.eat(SyntaxKind::Dot) {
            if !self.at_any(ATOM_FIRST) {
                self.report(DiagnosticKind::ExpectedKey, Some("after `.`"));
                break;
            }
            self.parse_atom();
        }
        self.close_node();
    }

    fn parse_value(&mut self) {
        match self.current() {
            SyntaxKind::BraceOpen => self.parse_compound(),
            SyntaxKind::BracketOpen => self.parse_array(),
            _ => self.parse_atom(),
        }
    }

    /// Word, integer or quoted string. Caller checks `ATOM_FIRST`.
    fn parse_atom(&mut self) {
        self.open_node(SyntaxKind::Atom);
        let kind = self.current();
        self.bump();
        if matches!(kind, SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote) {
            self.eat(SyntaxKind::StrVal);
            // The lexer only produces balanced quotes.
            self.eat(kind);
        }
        self.close_node();
    }

    fn parse_compound(&mut self) {
        self.expect_current(SyntaxKind::BraceOpen);
        if !self.descend() {
            self.abandon();
            return;
        }

        self.open_node(SyntaxKind::Compound);
        self.bump();
        while !self.done() && !self.at(SyntaxKind::BraceClose) {
            if self.at_any(ATOM_FIRST) {
                self.parse_entry();
            } else {
                self.skip(DiagnosticKind::UnexpectedToken, "expected a key or `}`");
            }
        }
        self.ascend(SyntaxKind::BraceClose, DiagnosticKind::UnclosedCompound, "compound");
        self.close_node();
    }

    fn parse_array(&mut self) {
        self.expect_current(SyntaxKind::BracketOpen);
        if !self.descend() {
            self.abandon();
            return;
        }

        self.open_node(SyntaxKind::Array);
        self.bump();
        while !self.done() && !self.at(SyntaxKind::BracketClose) {
            if !self.at_any(VALUE_FIRST) {
                self.skip(DiagnosticKind::UnexpectedToken, "expected a value or `]`");
                continue;
            }
            self.parse_value();
            if self.at_any(SEPARATORS) {
                self.bump();
            }
        }
        self.ascend(SyntaxKind::BracketClose, DiagnosticKind::UnclosedArray, "array");
        self.close_node();
    }

    /// Recursion limit hit: the rest of the input goes into one `Error` node.
    fn abandon(&mut self) {
        self.open_node(SyntaxKind::Error);
        while !self.at_end() {
            self.bump();
        }
        self.close_node();
    }
}
