use std::io;

use crate::format::{ABI_VERSION, HEADER_SIZE};

/// Error while decoding a topology binary.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("invalid magic {found:#010x} at offset {offset:#x}")]
    InvalidMagic { offset: u64, found: u32 },
    #[error("unsupported ABI version {found} at offset {offset:#x} (expected {ABI_VERSION})")]
    UnsupportedAbi { offset: u64, found: u32 },
    #[error("invalid header size {found} at offset {offset:#x} (minimum {HEADER_SIZE})")]
    InvalidHeaderSize { offset: u64, found: u32 },
    #[error("truncated input: needed {needed} bytes at offset {offset:#x}, {available} available")]
    Truncated {
        offset: u64,
        needed: u64,
        available: u64,
    },
    #[error("invalid {what}: {value}")]
    InvalidRecord { what: &'static str, value: u32 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
