//! Block header (36 bytes).
//!
//! Every block of a topology binary starts with this header. Readers skip a
//! block they do not understand by advancing `size + payload_size` bytes.

use super::constants::{ABI_VERSION, BlockType, HEADER_SIZE, MAGIC};

/// Block header, nine little-endian u32 fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BlockHeader {
    pub magic: u32,
    pub abi: u32,
    /// Format version, written as the ABI version.
    pub version: u32,
    #[serde(rename = "type")]
    pub block_type: u32,
    /// Header size in bytes, always [`HEADER_SIZE`] when written by us.
    pub size: u32,
    pub vendor_type: u32,
    pub payload_size: u32,
    /// Grouping index shared by a cohort of objects.
    pub index: u32,
    /// Number of elements in the payload.
    pub count: u32,
}

const _: () = assert!(HEADER_SIZE == 9 * 4);

impl BlockHeader {
    pub fn new(block_type: BlockType, index: u32, payload_size: u32, count: u32) -> Self {
        Self {
            magic: MAGIC,
            abi: ABI_VERSION,
            version: ABI_VERSION,
            block_type: block_type.as_u32(),
            size: HEADER_SIZE as u32,
            vendor_type: 0,
            payload_size,
            index,
            count,
        }
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let field = |i: usize| {
            let at = i * 4;
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        Self {
            magic: field(0),
            abi: field(1),
            version: field(2),
            block_type: field(3),
            size: field(4),
            vendor_type: field(5),
            payload_size: field(6),
            index: field(7),
            count: field(8),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let fields = [
            self.magic,
            self.abi,
            self.version,
            self.block_type,
            self.size,
            self.vendor_type,
            self.payload_size,
            self.index,
            self.count,
        ];
        let mut bytes = [0u8; HEADER_SIZE];
        for (chunk, value) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    pub fn kind(&self) -> Option<BlockType> {
        BlockType::from_u32(self.block_type)
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_abi(&self) -> bool {
        self.abi == ABI_VERSION
    }

    /// Distance from this header to the next one.
    pub fn block_len(&self) -> u64 {
        u64::from(self.size) + u64::from(self.payload_size)
    }
}
