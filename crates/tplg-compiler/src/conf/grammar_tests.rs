use indoc::indoc;

use super::lexer::lex;
use super::{Parse, Parser, load, parse};
use crate::Error;

fn cst(source: &str) -> String {
    let (parse, diagnostics) = parse(source).unwrap();
    assert!(diagnostics.is_empty(), "{}", diagnostics.printer().render());
    parse.dump_cst()
}

fn errors(source: &str) -> String {
    let (_, diagnostics): (Parse, _) = parse(source).unwrap();
    diagnostics.printer().render()
}

#[test]
fn section_with_quoted_name() {
    insta::assert_snapshot!(cst(r#"SectionTLV."vol" { mute 1 }"#), @r#"
    Root
      Entry
        Key
          Atom
            Id "SectionTLV"
          Dot "."
          Atom
            DoubleQuote "\""
            StrVal "vol"
            DoubleQuote "\""
        Compound
          BraceOpen "{"
          Entry
            Key
              Atom
                Id "mute"
            Atom
              Integer "1"
          BraceClose "}"
    "#);
}

#[test]
fn array_with_separators() {
    insta::assert_snapshot!(cst(r#"values ["a", "b"]"#), @r#"
    Root
      Entry
        Key
          Atom
            Id "values"
        Array
          BracketOpen "["
          Atom
            DoubleQuote "\""
            StrVal "a"
            DoubleQuote "\""
          Comma ","
          Atom
            DoubleQuote "\""
            StrVal "b"
            DoubleQuote "\""
          BracketClose "]"
    "#);
}

#[test]
fn equals_and_terminator() {
    insta::assert_snapshot!(cst("a = 1;"), @r#"
    Root
      Entry
        Key
          Atom
            Id "a"
        Equals "="
        Atom
          Integer "1"
        Semicolon ";"
    "#);
}

#[test]
fn comments_are_kept_out_of_the_dump() {
    let source = indoc! {r#"
        # leading comment
        SectionText."t" {
            values [ "one" ] # trailing
        }
    "#};
    let dump = cst(source);
    assert!(!dump.contains("Comment"));
    assert!(dump.contains(r#"StrVal "one""#));
}

#[test]
fn unclosed_compound() {
    insta::assert_snapshot!(errors("Section { a 1"), @"error at 8..13: missing closing `}`; reached end of input (related: compound starts here at 8..9)");
}

#[test]
fn unclosed_array() {
    insta::assert_snapshot!(errors("a [ 1 2"), @"error at 2..7: missing closing `]`; reached end of input (related: array starts here at 2..3)");
}

#[test]
fn missing_value() {
    insta::assert_snapshot!(errors("a"), @"error at 1..1: expected a value");
}

#[test]
fn stray_closer_at_top_level() {
    insta::assert_snapshot!(errors("} a 1"), @"error at 0..1: unexpected token: expected a key, found `}`");
}

#[test]
fn dangling_dot_in_key() {
    insta::assert_snapshot!(errors("a. = 1"), @"error at 3..4: expected a key: after `.`");
}

#[test]
fn parser_always_produces_a_tree() {
    let (parse, diagnostics) = parse("a { b [ } ] c").unwrap();
    assert!(diagnostics.has_errors());
    assert_eq!(parse.root().entries().count(), 1);
}

#[test]
fn recursion_limit_is_fatal() {
    let result = load("a { b { c { d 1 } } }", 2);
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));

    assert!(load("a { b { d 1 } }", 2).is_ok());
}

#[test]
fn custom_limit_on_parser() {
    let source = "x [ [ [ 1 ] ] ]";
    let parser = Parser::new(source, lex(source)).with_recursion_limit(1);
    assert!(super::parse_with_parser(parser).is_err());
}
