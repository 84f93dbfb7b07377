use indoc::indoc;
use tplg_abi::format::{STREAM_CAPTURE, STREAM_PLAYBACK, StreamConfig};

use crate::store::{RefKind, Stream};
use crate::test_utils::{expect_parsed, messages, parse_store};

#[test]
fn capabilities() {
    let store = expect_parsed(indoc! {r#"
        SectionPCMCapabilities."System Playback" {
            formats "S16_LE,S24_LE"
            rate_min 8000
            rate_max 48000
            channels_min 1
            channels_max 2
            periods_max 16
        }
    "#});

    let caps = &store.pcm_caps.get("System Playback").unwrap().data;
    assert_eq!(caps.name, "System Playback");
    assert_eq!(caps.formats, (1 << 2) | (1 << 6));
    assert_eq!((caps.rate_min, caps.rate_max), (8000, 48000));
    assert_eq!((caps.channels_min, caps.channels_max), (1, 2));
    assert_eq!((caps.periods_min, caps.periods_max), (0, 16));
}

#[test]
fn unknown_format() {
    let (_, diagnostics) = parse_store(r#"SectionPCMCapabilities."c" { formats [ "S16_LE" "S16_XE" ] }"#);

    insta::assert_snapshot!(messages(&diagnostics), @r"
    error: invalid value: unknown PCM format `S16_XE`
      help: did you mean `S16_LE`?
    ");
}

#[test]
fn stream_configs() {
    let store = expect_parsed(indoc! {r#"
        SectionPCMConfig."PB48" {
            config."playback" {
                format "S16_LE"
                rate 48000
                channels 2
                period_bytes 1024
                buffer_bytes 4096
            }
        }
    "#});

    let config = &store.pcm_configs.get("PB48").unwrap().data;
    assert_eq!(
        config.streams[STREAM_PLAYBACK],
        Some(StreamConfig {
            name: "PB48".to_string(),
            format: 1 << 2,
            rate: 48000,
            period_bytes: 1024,
            buffer_bytes: 4096,
            channels: 2,
        })
    );
    assert_eq!(config.streams[STREAM_CAPTURE], None);
}

#[test]
fn unknown_stream_direction() {
    let (_, diagnostics) = parse_store(r#"SectionPCMConfig."c" { config."both" { rate 48000 } }"#);
    insta::assert_snapshot!(messages(&diagnostics), @"error: invalid value: unknown stream `both`, expected `playback` or `capture`");
}

#[test]
fn pcm_backend_and_codec_link() {
    let store = expect_parsed(indoc! {r#"
        SectionPCM."System" {
            id 0
            pcm."playback" {
                capabilities "System Playback"
                configs [ "PB48" "PB44" ]
            }
            pcm."capture" { capabilities "System Capture" }
        }
        SectionBE."SSP0" {
            id 1
            pcm."playback" { configs "PB48" }
        }
        SectionCC."Codec" { id 2 }
    "#});

    let pcm = store.pcms.get("System").unwrap();
    assert!(pcm.data.streams.iter().all(|s| s.enabled));
    let refs: Vec<_> = pcm.refs.iter().map(|r| (r.kind, r.name.as_str())).collect();
    assert_eq!(
        refs,
        [
            (RefKind::Caps(Stream::Playback), "System Playback"),
            (RefKind::Config(Stream::Playback), "PB48"),
            (RefKind::Config(Stream::Playback), "PB44"),
            (RefKind::Caps(Stream::Capture), "System Capture"),
        ]
    );

    let be = store.backends.get("SSP0").unwrap();
    assert_eq!(be.data.id, 1);
    assert!(be.data.streams[STREAM_PLAYBACK].enabled);
    assert!(!be.data.streams[STREAM_CAPTURE].enabled);

    let cc = store.codec_links.get("Codec").unwrap();
    assert_eq!(cc.data.id, 2);
    assert!(cc.refs.is_empty());
    assert!(store.pcms.get("SSP0").is_none());
}

#[test]
fn too_many_stream_configs() {
    let configs: Vec<String> = (0..9).map(|i| format!("\"cfg{i}\"")).collect();
    let source = format!(
        r#"SectionPCM."p" {{ pcm."playback" {{ configs [ {} ] }} }}"#,
        configs.join(" ")
    );
    let (store, diagnostics) = parse_store(&source);

    assert!(store.pcms.get("p").unwrap().refs.is_empty());
    insta::assert_snapshot!(messages(&diagnostics), @"error: too many items: 9 stream configs, at most 8 allowed");
}
