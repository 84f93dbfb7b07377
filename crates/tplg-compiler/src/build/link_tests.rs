use indoc::indoc;
use tplg_abi::format::{DbScale, KControl, STREAM_CAPTURE, STREAM_PLAYBACK};

use super::link;
use crate::store::Element;
use crate::test_utils::{expect_linked, link_store, messages};

#[test]
fn mixer_absorbs_tlv_and_data() {
    let store = expect_linked(indoc! {r#"
        SectionTLV."vol_tlv" { scale { min -9000 step 300 mute 1 } }
        SectionData."vol_data" { bytes "0x01,0x02" }
        SectionControlMixer."vol" {
            max 31
            tlv "vol_tlv"
            data "vol_data"
        }
    "#});

    let mixer = store.mixers.get("vol").unwrap();
    assert_eq!(
        mixer.data.tlv,
        Some(DbScale {
            min: -9000,
            step: 300,
            mute: true
        })
    );
    assert_eq!(mixer.data.priv_data, [1, 2]);
    assert_eq!(mixer.encoded_size(), 228 + 2 + 16);
    assert!(!mixer.absorbed);
    assert!(store.tlvs.get("vol_tlv").unwrap().absorbed);
    assert!(store.data.get("vol_data").unwrap().absorbed);
}

#[test]
fn shared_tlv_is_copied_into_each_control() {
    let store = expect_linked(indoc! {r#"
        SectionTLV."db" { scale { min -6000 step 100 } }
        SectionControlMixer."left" { tlv "db" }
        SectionControlMixer."right" { tlv "db" }
    "#});

    let sizes: Vec<_> = store.mixers.iter().map(Element::encoded_size).collect();
    assert_eq!(sizes, [244, 244]);
}

#[test]
fn enum_receives_texts() {
    let store = expect_linked(indoc! {r#"
        SectionText."modes" { values [ "Off" "On" ] }
        SectionControlEnum."Mode" { texts "modes" }
    "#});

    assert_eq!(store.enums.get("Mode").unwrap().data.texts, ["Off", "On"]);
}

#[test]
fn widget_absorbs_its_controls() {
    let store = expect_linked(indoc! {r#"
        SectionTLV."db" { scale { min -6000 step 100 } }
        SectionControlMixer."a" { max 1 tlv "db" }
        SectionControlMixer."b" { max 1 }
        SectionControlEnum."c" { mask 1 }
        SectionControlMixer."free" { max 1 }
        SectionWidget."Mixer" {
            type "mixer"
            mixer [ "a" "b" ]
            enum "c"
        }
    "#});

    let widget = store.widgets.get("Mixer").unwrap();
    let names: Vec<_> = widget.data.kcontrols.iter().map(KControl::name).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(widget.encoded_size(), 132 + (228 + 16) + 228 + 928);

    // Controls are linked before widgets, so the TLV travels with `a`.
    let KControl::Mixer(a) = &widget.data.kcontrols[0] else {
        panic!("expected a mixer kcontrol");
    };
    assert!(a.tlv.is_some());

    let emitted: Vec<_> = store.mixers.emitted().map(|e| e.name.as_str()).collect();
    assert_eq!(emitted, ["free"]);
    assert_eq!(store.enums.emitted().count(), 0);
}

#[test]
fn control_with_two_owners() {
    let (store, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."Switch" { max 1 }
        SectionWidget."Left" { type "pga" mixer "Switch" }
        SectionWidget."Right" { type "pga" mixer "Switch" }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @"error: control `Switch` is already used by another widget");
    assert_eq!(store.widgets.get("Left").unwrap().data.kcontrols.len(), 1);
    assert!(store.widgets.get("Right").unwrap().data.kcontrols.is_empty());
}

#[test]
fn undefined_widget_control() {
    let (store, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."Master Volume" { max 31 }
        SectionWidget."PGA" { type "pga" mixer "Master Volum" }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: `Master Volum` is not defined
      help: did you mean `Master Volume`?
    ");
    assert!(store.widgets.get("PGA").unwrap().data.kcontrols.is_empty());
    assert!(!store.mixers.get("Master Volume").unwrap().absorbed);
}

#[test]
fn reference_to_wrong_family() {
    let (_, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."Master" { max 1 }
        SectionWidget."DAC" { type "dac" }
        SectionGraph."g" { lines [ "Master, , DAC" ] }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @"error: expected sink widget, but `Master` is declared as mixer control");
}

#[test]
fn route_control_must_be_a_control() {
    let (_, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."Switch" { max 1 }
        SectionWidget."Speaker" { type "output" }
        SectionWidget."DAC" { type "dac" }
        SectionGraph."g" {
            lines [
                "Speaker, Switch, DAC"
                "Speaker, Swtch, DAC"
            ]
        }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: `Swtch` is not defined
      help: did you mean `Switch`?
    ");
}

#[test]
fn pcm_streams_are_filled() {
    let store = expect_linked(indoc! {r#"
        SectionPCMCapabilities."caps" { formats "S16_LE" rate_max 48000 }
        SectionPCMConfig."cfg" {
            config."playback" { rate 48000 }
            config."capture" { rate 16000 }
        }
        SectionPCM."System" {
            pcm."playback" { capabilities "caps" configs [ "cfg" ] }
            pcm."capture" { configs [ "cfg" ] }
        }
    "#});

    let pcm = &store.pcms.get("System").unwrap().data;
    let playback = &pcm.streams[STREAM_PLAYBACK];
    assert_eq!(playback.caps.as_ref().unwrap().rate_max, 48000);
    assert_eq!(playback.configs.len(), 1);
    assert_eq!(playback.configs[0].rate, 48000);

    let capture = &pcm.streams[STREAM_CAPTURE];
    assert!(capture.caps.is_none());
    assert_eq!(capture.configs[0].rate, 16000);
    assert!(store.pcm_configs.get("cfg").unwrap().absorbed);
}

#[test]
fn config_without_requested_direction() {
    let (_, diagnostics) = link_store(indoc! {r#"
        SectionPCMConfig."cfg" { config."playback" { rate 48000 } }
        SectionBE."SSP0" { pcm."capture" { configs "cfg" } }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @"error: expected a capture stream config, but `cfg` has none");
}

#[test]
fn all_errors_of_a_pass_are_reported() {
    let (_, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."a" { tlv "missing" }
        SectionControlBytes."b" { data "blob" }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: `missing` is not defined
    error: `blob` is not defined
    ");
}

#[test]
fn later_passes_do_not_run_after_errors() {
    let (_, diagnostics) = link_store(indoc! {r#"
        SectionControlMixer."a" { tlv "missing" }
        SectionWidget."w" { type "pga" mixer "nope" }
    "#});

    insta::assert_snapshot!(messages(&diagnostics), @"error: `missing` is not defined");
}

#[test]
fn linking_twice_gives_the_same_store() {
    let mut store = expect_linked(indoc! {r#"
        SectionData."blob" { bytes "0x01,0x02,0x03,0x04" }
        SectionControlMixer."a" { max 1 data "blob" }
        SectionWidget."w" { type "pga" mixer "a" data "blob" }
    "#});
    let before = store.widgets.get("w").unwrap().clone();

    let diagnostics = link(&mut store);

    assert!(diagnostics.is_empty(), "{}", messages(&diagnostics));
    assert_eq!(store.widgets.get("w").unwrap(), &before);
    assert_eq!(before.encoded_size(), 132 + 4 + 228 + 4);
    assert!(store.mixers.get("a").unwrap().absorbed);
}
