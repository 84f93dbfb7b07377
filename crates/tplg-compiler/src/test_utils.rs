//! Test helpers shared by the pass tests.

use std::fmt::Write;

use crate::build::link;
use crate::conf::{self, DEFAULT_RECURSION_LIMIT};
use crate::diagnostics::Diagnostics;
use crate::sections::parse_sections;
use crate::store::Store;

/// Runs the section parser over a source that must be syntactically valid.
pub fn parse_store(source: &str) -> (Store, Diagnostics) {
    let (root, mut diagnostics) = conf::load(source, DEFAULT_RECURSION_LIMIT).unwrap();
    assert!(!diagnostics.has_errors(), "{}", diagnostics.printer().render());
    let mut store = Store::new();
    diagnostics.extend(parse_sections(&root, None, &mut store));
    (store, diagnostics)
}

/// Section parser output for a source without any diagnostics.
pub fn expect_parsed(source: &str) -> Store {
    let (store, diagnostics) = parse_store(source);
    assert!(diagnostics.is_empty(), "{}", messages(&diagnostics));
    store
}

/// Parses cleanly, then links.
pub fn link_store(source: &str) -> (Store, Diagnostics) {
    let mut store = expect_parsed(source);
    let diagnostics = link(&mut store);
    (store, diagnostics)
}

pub fn expect_linked(source: &str) -> Store {
    let (store, diagnostics) = link_store(source);
    assert!(diagnostics.is_empty(), "{}", messages(&diagnostics));
    store
}

/// One `severity: message` line per diagnostic, hints indented below.
pub fn messages(diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        let _ = writeln!(out, "{}: {}", diag.severity(), diag.message());
        for hint in diag.hints() {
            let _ = writeln!(out, "  help: {}", hint);
        }
    }
    out
}
