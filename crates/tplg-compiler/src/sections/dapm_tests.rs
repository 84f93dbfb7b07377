use indoc::indoc;

use super::dapm::route_label;
use crate::store::RefKind;
use crate::test_utils::{expect_parsed, messages, parse_store};

#[test]
fn widget_fields() {
    let store = expect_parsed(indoc! {r#"
        SectionWidget."Output Mixer" {
            type "mixer"
            no_pm true
            shift 4
            stream_name "Playback"
            mixer [ "Left Switch" "Right Switch" ]
            enum "Mode"
            data "coeffs"
            event_type 1
            event_flags 0x9
        }
    "#});

    let element = store.widgets.get("Output Mixer").unwrap();
    let widget = &element.data;
    assert_eq!(widget.id, 3);
    assert_eq!(widget.name, "Output Mixer");
    assert_eq!(widget.sname, "Playback");
    assert_eq!((widget.reg, widget.shift), (-1, 4));
    assert_eq!((widget.event_type, widget.event_flags), (1, 9));
    assert!(widget.kcontrols.is_empty());

    let refs: Vec<_> = element.refs.iter().map(|r| (r.kind, r.name.as_str())).collect();
    assert_eq!(
        refs,
        [
            (RefKind::Mixer, "Left Switch"),
            (RefKind::Mixer, "Right Switch"),
            (RefKind::Enum, "Mode"),
            (RefKind::Data, "coeffs"),
        ]
    );
}

#[test]
fn widget_without_type() {
    let (store, diagnostics) = parse_store(r#"SectionWidget."DAC" { reg 3 }"#);

    assert!(store.widgets.is_empty());
    insta::assert_snapshot!(messages(&diagnostics), @"error: missing mandatory field `type`");
}

#[test]
fn unknown_widget_type() {
    let (_, diagnostics) = parse_store(r#"SectionWidget."DAC" { type "mixr" }"#);

    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: invalid value: unknown widget type `mixr`
      help: did you mean `mixer`?
    ");
}

#[test]
fn graph_lines_become_routes() {
    let store = expect_parsed(indoc! {r#"
        SectionGraph."main" {
            index 1
            lines [
                "Speaker, , Output Mixer"
                "Output Mixer, Left Switch, DAC"
            ]
        }
    "#});

    let names: Vec<_> = store.routes.names().collect();
    assert_eq!(names, ["Speaker <- Output Mixer", "Output Mixer <- Left Switch <- DAC"]);

    let route = store.routes.get("Output Mixer <- Left Switch <- DAC").unwrap();
    assert_eq!(route.index, 1);
    assert_eq!(route.data.control, "Left Switch");
    let kinds: Vec<_> = route.refs.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, [RefKind::Sink, RefKind::Control, RefKind::Source]);

    let direct = store.routes.get("Speaker <- Output Mixer").unwrap();
    assert_eq!(direct.refs.len(), 2);
    assert_eq!(route_label(&direct.data), "Speaker <- Output Mixer");
}

#[test]
fn malformed_graph_line() {
    let (store, diagnostics) = parse_store(r#"SectionGraph."g" { lines [ "Speaker, DAC" ", , DAC" ] }"#);

    assert!(store.routes.is_empty());
    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: malformed graph line: `Speaker, DAC` is not `sink, control, source`
    error: malformed graph line: `, , DAC` is not `sink, control, source`
    ");
}

#[test]
fn duplicate_route() {
    let (store, diagnostics) = parse_store(indoc! {r#"
        SectionGraph."a" { lines [ "Speaker, , DAC" ] }
        SectionGraph."b" { lines [ "Speaker, , DAC" ] }
    "#});

    assert_eq!(store.routes.len(), 1);
    insta::assert_snapshot!(messages(&diagnostics), @"error: `Speaker <- DAC` is already defined");
}

#[test]
fn graph_without_lines() {
    let (_, diagnostics) = parse_store(r#"SectionGraph."g" { index 0 }"#);
    insta::assert_snapshot!(messages(&diagnostics), @"error: missing mandatory field `lines`");
}
