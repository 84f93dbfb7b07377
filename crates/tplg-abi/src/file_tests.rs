use crate::format::{ControlHeader, GraphElem, MixerControl};
use crate::{BlockHeader, BlockType, ByteWriter, ReadError, Record, TopologyFile};

fn mixer(name: &str) -> MixerControl {
    MixerControl {
        hdr: ControlHeader {
            name: name.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn build(blocks: &[(BlockType, Vec<u8>, u32)]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    for (kind, payload, count) in blocks {
        let header = BlockHeader::new(*kind, 0, payload.len() as u32, *count);
        w.bytes(&header.to_bytes()).bytes(payload);
    }
    w.into_bytes()
}

fn mixers(names: &[&str]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    for name in names {
        mixer(name).encode(&mut w);
    }
    w.into_bytes()
}

#[test]
fn walks_blocks_by_header_sizes() {
    let mut route = ByteWriter::new();
    GraphElem {
        sink: "Speaker".to_string(),
        control: String::new(),
        source: "DAC".to_string(),
    }
    .encode(&mut route);

    let bytes = build(&[
        (BlockType::Mixer, mixers(&["vol1", "vol2"]), 2),
        (BlockType::DapmGraph, route.into_bytes(), 1),
    ]);
    let file = TopologyFile::from_bytes(bytes).unwrap();

    let blocks = file.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].offset, 0);
    assert_eq!(blocks[1].offset, 36 + 2 * 228);
    assert_eq!(blocks[1].header.kind(), Some(BlockType::DapmGraph));

    let routes = file.records(&blocks[1]).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].label(), "Speaker <- DAC");
}

#[test]
fn unknown_block_type_is_skipped() {
    let mut bytes = build(&[(BlockType::Mixer, vec![0xde, 0xad, 0xbe, 0xef], 1)]);
    // patch the type field to something we do not know
    bytes[12..16].copy_from_slice(&99u32.to_le_bytes());
    bytes.extend(build(&[(BlockType::Mixer, mixers(&["after"]), 1)]));

    let file = TopologyFile::from_bytes(bytes).unwrap();
    assert_eq!(file.blocks().len(), 2);
    assert!(file.records(&file.blocks()[0]).unwrap().is_empty());

    let records = file.records(&file.blocks()[1]).unwrap();
    assert!(matches!(&records[0], Record::Mixer(m) if m.hdr.name == "after"));
}

#[test]
fn bad_magic() {
    let mut bytes = build(&[(BlockType::Mixer, mixers(&["x"]), 1)]);
    bytes[0] = 0;
    let err = TopologyFile::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, ReadError::InvalidMagic { offset: 0, .. }));
}

#[test]
fn truncated_payload() {
    let mut bytes = build(&[(BlockType::Mixer, mixers(&["x"]), 1)]);
    bytes.truncate(100);
    let err = TopologyFile::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        ReadError::Truncated {
            offset: 0,
            needed: 264,
            available: 100
        }
    ));
}

#[test]
fn count_mismatch_is_reported() {
    let bytes = build(&[(BlockType::Mixer, mixers(&["a", "b"]), 1)]);
    let file = TopologyFile::from_bytes(bytes).unwrap();
    let err = file.records(&file.blocks()[0]).unwrap_err();
    assert!(matches!(
        err,
        ReadError::InvalidRecord {
            what: "trailing payload bytes",
            value: 228
        }
    ));
}

#[test]
fn oversized_count_fails_on_short_payload() {
    let bytes = build(&[
        (BlockType::DapmGraph, Vec::new(), u32::MAX),
        (BlockType::Mixer, mixers(&["vol"]), u32::MAX),
    ]);
    let file = TopologyFile::from_bytes(bytes).unwrap();
    let blocks = file.blocks();

    let err = file.records(&blocks[0]).unwrap_err();
    assert!(matches!(
        err,
        ReadError::Truncated {
            offset: 36,
            available: 0,
            ..
        }
    ));
    let err = file.records(&blocks[1]).unwrap_err();
    assert!(matches!(err, ReadError::Truncated { available: 0, .. }));
    assert!(file.decode_all().is_err());
}

#[test]
fn empty_file_has_no_blocks() {
    let file = TopologyFile::from_bytes(Vec::new()).unwrap();
    assert!(file.blocks().is_empty());
    assert!(file.is_empty());
}

#[test]
fn decoded_blocks_serialize_with_kind_tags() {
    let bytes = build(&[(BlockType::Mixer, mixers(&["vol1"]), 1)]);
    let file = TopologyFile::from_bytes(bytes).unwrap();

    let json = serde_json::to_value(file.decode_all().unwrap()).unwrap();
    assert_eq!(json[0]["offset"], 0);
    assert_eq!(json[0]["header"]["type"], 1);
    assert_eq!(json[0]["header"]["payload_size"], 228);
    assert_eq!(json[0]["elements"][0]["kind"], "mixer");
    assert_eq!(json[0]["elements"][0]["hdr"]["name"], "vol1");
}
