//! On-disk format of ALSA SoC topology binaries.
//!
//! This crate contains:
//! - Format definitions (block header, element records, named value tables)
//! - A block reader that walks a compiled file without interpreting payloads
//! - A human-readable dump of a compiled file

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod dump;
mod error;
mod file;
pub mod format;

#[cfg(test)]
mod file_tests;

pub use dump::dump;
pub use error::ReadError;
pub use file::{Block, DecodedBlock, Record, TopologyFile};
pub use format::{
    ABI_VERSION, BlockHeader, BlockType, ByteReader, ByteWriter, HEADER_SIZE, MAGIC, NAME_MAXLEN,
};
pub use tplg_core::Colors;
