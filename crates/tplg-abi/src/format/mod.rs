//! Binary layout of a topology file.
//!
//! A file is a sequence of blocks. Each block is a [`BlockHeader`] followed by
//! `payload_size` bytes holding `count` records of the header's type.

mod constants;
mod header;
pub mod names;
mod records;
mod writer;


pub use constants::{
    ABI_VERSION, BlockType, HEADER_SIZE, MAGIC, MAX_CHAN, NAME_MAXLEN, NUM_TEXTS,
    STREAM_CAPTURE, STREAM_CONFIG_MAX, STREAM_PLAYBACK,
};
pub use header::BlockHeader;
pub use names::NameTable;
pub use records::{
    BytesControl, Channel, ControlHeader, DbScale, EnumControl, GraphElem, IoOps, KControl,
    MixerControl, PcmDai, PcmStream, StreamCaps, StreamConfig, Widget,
};
pub use writer::{ByteReader, ByteWriter};
