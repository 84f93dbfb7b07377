use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn significant(source: &str) -> Vec<(SyntaxKind, &str)> {
    lex(source)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, token_text(source, t)))
        .collect()
}

#[test]
fn section_key_with_quoted_name() {
    assert_eq!(
        significant(r#"SectionTLV."vol" {"#),
        vec![
            (Id, "SectionTLV"),
            (Dot, "."),
            (DoubleQuote, "\""),
            (StrVal, "vol"),
            (DoubleQuote, "\""),
            (BraceOpen, "{"),
        ]
    );
}

#[test]
fn integers() {
    assert_eq!(
        significant("42 -9000 0x1f"),
        vec![(Integer, "42"), (Integer, "-9000"), (Integer, "0x1f")]
    );
}

#[test]
fn words_keep_underscores_and_dashes() {
    assert_eq!(
        significant("aif_in S16_LE no-pm"),
        vec![(Id, "aif_in"), (Id, "S16_LE"), (Id, "no-pm")]
    );
}

#[test]
fn comments_and_newlines_are_trivia() {
    let kinds: Vec<_> = lex("# header\nfoo").iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Comment, Newline, Id]);
    assert!(Comment.is_trivia());
}

#[test]
fn garbage_is_coalesced() {
    let kinds: Vec<_> = lex("foo @@@ bar").iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Id, Whitespace, Garbage, Whitespace, Id]);
}

#[test]
fn empty_and_single_quoted_strings() {
    assert_eq!(
        significant(r#""" 'a b'"#),
        vec![
            (DoubleQuote, "\""),
            (DoubleQuote, "\""),
            (SingleQuote, "'"),
            (StrVal, "a b"),
            (SingleQuote, "'"),
        ]
    );
}

#[test]
fn escaped_quote_stays_inside_string() {
    assert_eq!(
        significant(r#""say \"hi\"""#),
        vec![
            (DoubleQuote, "\""),
            (StrVal, r#"say \"hi\""#),
            (DoubleQuote, "\""),
        ]
    );
}
