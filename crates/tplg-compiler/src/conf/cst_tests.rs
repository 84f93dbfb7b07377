use rowan::Language;

use super::cst::token_sets::{ATOM_FIRST, SEPARATORS, VALUE_FIRST};
use super::cst::{ConfLang, SyntaxKind::*, TokenSet};

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[BraceOpen, BraceClose, Dot]);
    assert!(set.contains(BraceOpen));
    assert!(set.contains(BraceClose));
    assert!(set.contains(Dot));
    assert!(!set.contains(Comma));
}

#[test]
fn value_first_extends_atom_first() {
    assert!(ATOM_FIRST.contains(Id));
    assert!(!ATOM_FIRST.contains(BraceOpen));
    assert!(VALUE_FIRST.contains(Id));
    assert!(VALUE_FIRST.contains(BraceOpen));
    assert!(VALUE_FIRST.contains(BracketOpen));
    assert!(!VALUE_FIRST.contains(BraceClose));
    assert!(SEPARATORS.contains(Comma) && SEPARATORS.contains(Semicolon));
}

#[test]
fn trivia() {
    assert!(Whitespace.is_trivia());
    assert!(Newline.is_trivia());
    assert!(Comment.is_trivia());
    assert!(!Id.is_trivia());
    assert!(!Garbage.is_trivia());
}

#[test]
fn every_kind_maps_back_from_raw() {
    for kind in [BraceOpen, StrVal, Integer, Garbage, Error, Root, Entry, Array] {
        let raw = ConfLang::kind_to_raw(kind);
        assert_eq!(ConfLang::kind_from_raw(raw), kind);
    }
}
