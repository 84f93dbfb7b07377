use indoc::indoc;
use tplg_abi::format::DbScale;

use super::SectionKind;
use crate::test_utils::{expect_parsed, messages, parse_store};

#[test]
fn section_names_round_trip() {
    for kind in SectionKind::all() {
        assert_eq!(SectionKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(SectionKind::from_name("SectionBE"), Some(SectionKind::Backend));
    assert_eq!(SectionKind::from_name("sectionbe"), None);
}

#[test]
fn unknown_section_is_skipped_with_warning() {
    let (store, diagnostics) = parse_store(indoc! {r#"
        SectionTLV."vol_tlv" { scale { min -9000 step 300 } }
        SectionControlMixers."vol" { max 31 }
    "#});

    assert_eq!(store.tlvs.len(), 1);
    assert!(store.mixers.is_empty());
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(messages(&diagnostics), @r"
    warning: unknown section `SectionControlMixers`
      help: did you mean `SectionControlMixer`?
    ");
}

#[test]
fn section_must_be_compound() {
    let (_, diagnostics) = parse_store("SectionTLV 5");
    insta::assert_snapshot!(messages(&diagnostics), @"error: expected a compound: section `SectionTLV` is an integer");
}

#[test]
fn declaration_must_be_compound() {
    let (store, diagnostics) = parse_store(indoc! {r#"
        SectionText {
            broken "x"
            ok { values [ "a" ] }
        }
    "#});

    assert_eq!(store.texts.names().collect::<Vec<_>>(), ["ok"]);
    insta::assert_snapshot!(messages(&diagnostics), @"error: expected a compound: declaration `broken` in `SectionText` is a string");
}

#[test]
fn declaration_name_too_long() {
    let name = "a".repeat(44);
    let (store, diagnostics) = parse_store(&format!(r#"SectionText."{name}" {{ values [ "x" ] }}"#));

    assert!(store.texts.is_empty());
    assert_eq!(
        messages(&diagnostics),
        format!("error: name `{name}` is too long (at most 43 bytes)\n")
    );
}

#[test]
fn grouping_index() {
    let store = expect_parsed(indoc! {r#"
        SectionControlMixer."vol" { index 3 max 1 }
        SectionControlMixer."mute" { max 1 }
    "#});

    assert_eq!(store.mixers.get("vol").unwrap().index, 3);
    assert_eq!(store.mixers.get("mute").unwrap().index, 0);
}

#[test]
fn tlv_scale() {
    let store = expect_parsed(indoc! {r#"
        SectionTLV."vol_tlv" {
            scale {
                min -9000
                step 300
                mute 1
            }
        }
    "#});

    let tlv = store.tlvs.get("vol_tlv").unwrap();
    assert_eq!(
        tlv.data,
        DbScale {
            min: -9000,
            step: 300,
            mute: true
        }
    );
}

#[test]
fn tlv_without_scale() {
    let (store, diagnostics) = parse_store(r#"SectionTLV."t" { comment "nothing" }"#);

    assert!(store.tlvs.is_empty());
    insta::assert_snapshot!(messages(&diagnostics), @"error: missing mandatory field `scale`");
}

#[test]
fn tlv_step_out_of_range() {
    let (_, diagnostics) = parse_store(r#"SectionTLV."t" { scale { step 70000 } }"#);
    insta::assert_snapshot!(messages(&diagnostics), @"error: invalid value: `70000` is out of range for `step`");
}

#[test]
fn text_values() {
    let store = expect_parsed(r#"SectionText."route" { values [ "On" "Off" "Auto" ] }"#);
    assert_eq!(store.texts.get("route").unwrap().data.values, ["On", "Off", "Auto"]);
}

#[test]
fn too_many_texts() {
    let values: Vec<String> = (0..17).map(|i| format!("\"t{i}\"")).collect();
    let source = format!(r#"SectionText."many" {{ values [ {} ] }}"#, values.join(" "));
    let (store, diagnostics) = parse_store(&source);

    assert!(store.texts.is_empty());
    insta::assert_snapshot!(messages(&diagnostics), @"error: too many items: 17 texts, at most 16 allowed");
}

#[test]
fn integer_where_string_expected() {
    let (_, diagnostics) = parse_store(r#"SectionText."t" { values [ "a" 5 ] }"#);
    insta::assert_snapshot!(messages(&diagnostics), @"error: expected a string: `1` is an integer");
}
