//! Reader for compiled topology files.
//!
//! Blocks are located purely from their headers (`size + payload_size`), so a
//! file with block types this crate does not know still walks cleanly.

use std::ops::Range;
use std::path::Path;

use crate::ReadError;
use crate::format::{
    BlockHeader, BlockType, ByteReader, BytesControl, EnumControl, GraphElem, HEADER_SIZE,
    MixerControl, PcmDai, Widget,
};

/// One block located in a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Offset of the header from the start of the file.
    pub offset: u64,
    pub header: BlockHeader,
    payload: Range<usize>,
}

impl Block {
    pub fn payload_offset(&self) -> u64 {
        self.payload.start as u64
    }
}

/// Decoded element of a known block type.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Mixer(MixerControl),
    Enum(EnumControl),
    Bytes(BytesControl),
    Widget(Widget),
    Route(GraphElem),
    Pcm(PcmDai),
}

impl Record {
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Mixer(r) => r.encoded_len(),
            Self::Enum(r) => r.encoded_len(),
            Self::Bytes(r) => r.encoded_len(),
            Self::Widget(r) => r.encoded_len(),
            Self::Route(r) => r.encoded_len(),
            Self::Pcm(r) => r.encoded_len(),
        }
    }

    /// Display name; routes show `sink <- control <- source`.
    pub fn label(&self) -> String {
        match self {
            Self::Mixer(r) => r.hdr.name.clone(),
            Self::Enum(r) => r.hdr.name.clone(),
            Self::Bytes(r) => r.hdr.name.clone(),
            Self::Widget(r) => r.name.clone(),
            Self::Route(r) if r.control.is_empty() => format!("{} <- {}", r.sink, r.source),
            Self::Route(r) => format!("{} <- {} <- {}", r.sink, r.control, r.source),
            Self::Pcm(r) => r.name.clone(),
        }
    }
}

/// Block with its decoded elements, for structured dumps.
#[derive(Clone, Debug, serde::Serialize)]
pub struct DecodedBlock {
    pub offset: u64,
    pub header: BlockHeader,
    pub elements: Vec<Record>,
}

/// A compiled topology file held in memory.
#[derive(Debug)]
pub struct TopologyFile {
    bytes: Vec<u8>,
    blocks: Vec<Block>,
}

impl TopologyFile {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ReadError> {
        let blocks = walk_blocks(&bytes)?;
        Ok(Self { bytes, blocks })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn payload(&self, block: &Block) -> &[u8] {
        &self.bytes[block.payload.clone()]
    }

    /// Decodes the elements of a block. Unknown block types decode to nothing.
    pub fn records(&self, block: &Block) -> Result<Vec<Record>, ReadError> {
        let Some(kind) = block.header.kind() else {
            return Ok(Vec::new());
        };
        let decode: fn(&mut ByteReader<'_>) -> Result<Record, ReadError> = match kind {
            BlockType::Mixer => |r| MixerControl::decode(r).map(Record::Mixer),
            BlockType::Enum => |r| EnumControl::decode(r).map(Record::Enum),
            BlockType::Bytes => |r| BytesControl::decode(r).map(Record::Bytes),
            BlockType::DapmWidget => |r| Widget::decode(r).map(Record::Widget),
            BlockType::DapmGraph => |r| GraphElem::decode(r).map(Record::Route),
            BlockType::Pcm | BlockType::BackendLink | BlockType::CodecLink | BlockType::DaiLink => {
                |r| PcmDai::decode(r).map(Record::Pcm)
            }
            BlockType::Manifest => return Ok(Vec::new()),
        };

        let mut reader = ByteReader::at(self.payload(block), block.payload_offset());
        // `count` is untrusted; the payload length bounds the loop instead.
        let mut records = Vec::new();
        for _ in 0..block.header.count {
            records.push(decode(&mut reader)?);
        }
        if !reader.is_empty() {
            return Err(ReadError::InvalidRecord {
                what: "trailing payload bytes",
                value: reader.remaining() as u32,
            });
        }
        Ok(records)
    }

    pub fn decode_all(&self) -> Result<Vec<DecodedBlock>, ReadError> {
        self.blocks
            .iter()
            .map(|block| {
                Ok(DecodedBlock {
                    offset: block.offset,
                    header: block.header,
                    elements: self.records(block)?,
                })
            })
            .collect()
    }
}

fn walk_blocks(bytes: &[u8]) -> Result<Vec<Block>, ReadError> {
    let mut blocks = Vec::new();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let available = bytes.len() - offset;
        let Some(raw) = bytes
            .get(offset..offset + HEADER_SIZE)
            .and_then(|s| <&[u8; HEADER_SIZE]>::try_from(s).ok())
        else {
            return Err(ReadError::Truncated {
                offset: offset as u64,
                needed: HEADER_SIZE as u64,
                available: available as u64,
            });
        };
        let header = BlockHeader::from_bytes(raw);

        if !header.validate_magic() {
            return Err(ReadError::InvalidMagic {
                offset: offset as u64,
                found: header.magic,
            });
        }
        if !header.validate_abi() {
            return Err(ReadError::UnsupportedAbi {
                offset: offset as u64,
                found: header.abi,
            });
        }
        if (header.size as usize) < HEADER_SIZE {
            return Err(ReadError::InvalidHeaderSize {
                offset: offset as u64,
                found: header.size,
            });
        }

        let block_len = header.block_len();
        if block_len > available as u64 {
            return Err(ReadError::Truncated {
                offset: offset as u64,
                needed: block_len,
                available: available as u64,
            });
        }

        let start = offset + header.size as usize;
        let end = start + header.payload_size as usize;
        blocks.push(Block {
            offset: offset as u64,
            header,
            payload: start..end,
        });
        offset = end;
    }

    Ok(blocks)
}
