//! Front end for ALSA configuration text.
//!
//! The parser produces a lossless concrete syntax tree via Rowan's green tree
//! builder and never fails on malformed input: missing delimiters and stray
//! tokens become diagnostics and `Error` nodes. Only the recursion limit is
//! fatal. [`tree`] lowers the syntax tree into owned [`ConfigNode`]s.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod tree;

mod core;
mod grammar;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt::Write;

use rowan::NodeOrToken;

pub use self::core::{DEFAULT_RECURSION_LIMIT, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use tree::{ConfigNode, ConfigValue, parse_int};

use crate::PassResult;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete - diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> ast::Root {
        ast::Root::cast(self.syntax()).expect("parser always produces Root")
    }

    /// Indented CST listing without trivia.
    pub fn dump_cst(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = format_cst(&self.syntax(), 0, &mut out);
        out
    }
}

/// Parses with the default recursion limit.
pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source)))
}

pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst }, diagnostics))
}

/// Parses and lowers in one go. Syntax and lowering diagnostics are merged.
pub fn load(source: &str, recursion_limit: u32) -> PassResult<ConfigNode> {
    let parser = Parser::new(source, lex(source)).with_recursion_limit(recursion_limit);
    let (parse, mut diagnostics) = parse_with_parser(parser)?;
    let (tree, lowering) = tree::lower(&parse.root());
    diagnostics.extend(lowering);
    Ok((tree, diagnostics))
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            NodeOrToken::Token(t) if !t.kind().is_trivia() => {
                writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
            }
            NodeOrToken::Token(_) => {}
        }
    }
    Ok(())
}
