use std::io::{self, Cursor, Seek, SeekFrom, Write};

use indoc::indoc;
use rowan::TextRange;
use tplg_abi::format::{BlockType, ByteWriter, HEADER_SIZE};
use tplg_abi::{Record, TopologyFile};

use super::emitter::header_field;
use super::{EmitError, Emitter, emit};
use crate::store::{Collection, Element, ElementKind, Payload, Store};
use crate::test_utils::expect_linked;

fn emit_bytes(store: &Store) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    emit(store, &mut out, None).unwrap();
    out.into_inner()
}

fn block_types(bytes: Vec<u8>) -> Vec<(u32, u32, u32)> {
    let file = TopologyFile::from_bytes(bytes).unwrap();
    file.blocks()
        .iter()
        .map(|b| (b.header.block_type, b.header.index, b.header.count))
        .collect()
}

#[test]
fn mixers_share_one_block() {
    let store = expect_linked(indoc! {r#"
        SectionControlMixer."a" { max 1 }
        SectionControlMixer."b" { max 1 }
        SectionControlMixer."c" { max 1 }
    "#});

    let mut out = Cursor::new(Vec::new());
    let blocks = emit(&store, &mut out, None).unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].offset, 0);
    assert_eq!(blocks[0].header.count, 3);
    assert_eq!(blocks[0].header.payload_size, 3 * 228);
    assert_eq!(out.get_ref().len(), HEADER_SIZE + 3 * 228);

    let file = TopologyFile::from_bytes(out.into_inner()).unwrap();
    let names: Vec<_> = file
        .records(&file.blocks()[0])
        .unwrap()
        .iter()
        .map(Record::label)
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn empty_store_writes_nothing() {
    let mut out = Cursor::new(Vec::new());
    let blocks = emit(&Store::new(), &mut out, None).unwrap();
    assert!(blocks.is_empty());
    assert!(out.get_ref().is_empty());
}

#[test]
fn one_block_per_index_ascending() {
    let store = expect_linked(indoc! {r#"
        SectionControlMixer."late" { index 2 max 1 }
        SectionControlMixer."early" { index 1 max 1 }
        SectionControlMixer."also_late" { index 2 max 1 }
    "#});

    assert_eq!(block_types(emit_bytes(&store)), [(1, 1, 1), (1, 2, 2)]);
}

#[test]
fn families_in_fixed_order() {
    let store = expect_linked(indoc! {r#"
        SectionGraph."g" { lines [ "Speaker, , DAC" ] }
        SectionCC."Codec" { id 2 }
        SectionBE."SSP0" { id 1 }
        SectionPCM."System" { id 0 }
        SectionWidget."DAC" { type "dac" }
        SectionWidget."Speaker" { type "output" }
        SectionControlBytes."blob" { max 4 }
        SectionControlEnum."mode" { mask 1 }
        SectionControlMixer."vol" { max 1 }
    "#});

    let types: Vec<_> = block_types(emit_bytes(&store))
        .into_iter()
        .map(|(block_type, _, _)| block_type)
        .collect();
    assert_eq!(types, [1, 3, 2, 5, 7, 10, 9, 4]);
}

#[test]
fn absorbed_controls_are_not_emitted() {
    let store = expect_linked(indoc! {r#"
        SectionControlMixer."owned" { max 1 }
        SectionControlMixer."free" { max 1 }
        SectionWidget."PGA" { type "pga" mixer "owned" }
    "#});

    let file = TopologyFile::from_bytes(emit_bytes(&store)).unwrap();
    let blocks = file.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].header.count, 1);
    assert_eq!(blocks[1].header.payload_size, 132 + 228);

    let records = file.records(&blocks[0]).unwrap();
    assert_eq!(records[0].label(), "free");
}

#[test]
fn offsets_start_at_cursor_position() {
    let store = expect_linked(r#"SectionControlMixer."vol" { max 1 }"#);
    let mut out = Cursor::new(vec![0xff; 8]);
    out.seek(SeekFrom::End(0)).unwrap();

    let blocks = emit(&store, &mut out, None).unwrap();
    assert_eq!(blocks[0].offset, 8);
    assert_eq!(out.get_ref().len(), 8 + HEADER_SIZE + 228);
}

#[test]
fn verbose_trace() {
    let store = expect_linked(indoc! {r#"
        SectionControlMixer."vol" { max 1 }
        SectionWidget."DAC" { type "dac" }
        SectionWidget."AIF" { type "aif_in" }
        SectionGraph."g" { lines [ "DAC, , AIF" ] }
    "#});

    let mut out = Cursor::new(Vec::new());
    let mut trace = Vec::new();
    emit(&store, &mut out, Some(&mut trace)).unwrap();

    insta::assert_snapshot!(String::from_utf8(trace).unwrap(), @r"
    0x000000/000000 - block size for type 1 is 228
    0x000000/000000 - header type 1 size 0xe4/228 vendor 0 version 5
    0x000024/000036 - mixer 'vol': write 228 bytes
    0x000108/000264 - block size for type 5 is 264
    0x000108/000264 - header type 5 size 0x108/264 vendor 0 version 5
    0x00012c/000300 - widget 'DAC': write 132 bytes
    0x0001b0/000432 - widget 'AIF': write 132 bytes
    0x000234/000564 - block size for type 4 is 132
    0x000234/000564 - header type 4 size 0x84/132 vendor 0 version 5
    0x000258/000600 - route 'AIF': write 132 bytes
    ");
    assert_eq!(out.get_ref().len(), 732);
}

/// Writes every buffer twice while reporting it once.
struct Stutter(Cursor<Vec<u8>>);

impl Write for Stutter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_all(buf)?;
        self.0.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Stutter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

#[test]
fn drifting_cursor_is_an_offset_mismatch() {
    let store = expect_linked(indoc! {r#"
        SectionControlMixer."a" { max 1 }
        SectionControlMixer."b" { index 1 max 1 }
    "#});

    let mut out = Stutter(Cursor::new(Vec::new()));
    let err = emit(&store, &mut out, None).unwrap_err();

    assert!(matches!(
        err,
        EmitError::OffsetMismatch {
            expected: 264,
            actual: 528
        }
    ));
    assert!(err.is_internal());
    assert_eq!(err.errno(), -22);
    insta::assert_snapshot!(err, @"new header is at offset 0x108 but file offset 0x210 is ahead by 264 bytes");
}

/// Announces more bytes than it encodes.
#[derive(Debug)]
struct Short;

impl Payload for Short {
    fn encoded_len(&self) -> usize {
        8
    }

    fn encode(&self, w: &mut ByteWriter) {
        w.u32(0);
    }
}

#[test]
fn short_record_is_a_size_mismatch() {
    let mut family = Collection::new(ElementKind::Mixer);
    family
        .insert(Element::new("short", TextRange::default(), Short))
        .unwrap();

    let mut out = Cursor::new(Vec::new());
    let mut emitter = Emitter::new(&mut out, None).unwrap();
    let err = emitter.write_family(&family, |e| e.name.as_str()).unwrap_err();

    assert!(matches!(
        err,
        EmitError::SizeMismatch {
            block: BlockType::Mixer,
            expected: 8,
            written: 4
        }
    ));
    assert!(!err.is_internal());
    assert_eq!(err.errno(), -5);
}

#[test]
fn leaf_families_have_no_block() {
    let mut family = Collection::new(ElementKind::Tlv);
    family
        .insert(Element::new("short", TextRange::default(), Short))
        .unwrap();

    let mut out = Cursor::new(Vec::new());
    let mut emitter = Emitter::new(&mut out, None).unwrap();
    emitter.write_family(&family, |e| e.name.as_str()).unwrap();
    assert!(emitter.finish().is_empty());
    assert!(out.get_ref().is_empty());
}

#[test]
fn header_fields_past_u32_are_too_large() {
    let max = u64::from(u32::MAX);
    assert_eq!(header_field(BlockType::Mixer, "payload", max).unwrap(), u32::MAX);

    let err = header_field(BlockType::Pcm, "element count", max + 1).unwrap_err();
    assert!(matches!(
        err,
        EmitError::TooLarge {
            block: BlockType::Pcm,
            what: "element count",
            value: 4_294_967_296
        }
    ));
    assert_eq!(err.errno(), -22);
    assert!(!err.is_internal());
    insta::assert_snapshot!(err, @"pcm block element count of 4294967296 does not fit a block header");
}
