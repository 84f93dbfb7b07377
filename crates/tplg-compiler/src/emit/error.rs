//! Error types for binary emission.

use std::io;

use tplg_abi::format::BlockType;

use crate::{EINVAL, EIO};

/// Error during binary emission.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    /// Fewer or more payload bytes written than the header announced.
    #[error("size mismatch in {block} block: expected {expected} bytes, wrote {written}")]
    SizeMismatch {
        block: BlockType,
        expected: u64,
        written: u64,
    },

    /// The output cursor is not where the previous headers said the next
    /// block starts.
    #[error(
        "new header is at offset {expected:#x} but file offset {actual:#x} is {}",
        drift(.expected, .actual)
    )]
    OffsetMismatch { expected: u64, actual: u64 },

    #[error("{block} block {what} of {value} does not fit a block header")]
    TooLarge {
        block: BlockType,
        what: &'static str,
        value: u64,
    },
}

fn drift(expected: &u64, actual: &u64) -> String {
    let side = if actual > expected { "ahead" } else { "behind" };
    format!("{} by {} bytes", side, actual.abs_diff(*expected))
}

impl EmitError {
    pub fn errno(&self) -> i32 {
        match self {
            Self::Io(err) => -err.raw_os_error().unwrap_or(EIO),
            Self::SizeMismatch { .. } => -EIO,
            Self::OffsetMismatch { .. } | Self::TooLarge { .. } => -EINVAL,
        }
    }

    /// Size accounting diverged from the bytes written; the output is corrupt.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::OffsetMismatch { .. })
    }
}
