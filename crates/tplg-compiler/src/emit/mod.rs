//! Binary emission of a linked store.
//!
//! Families are written in a fixed order, one block per grouping index:
//! - a 36-byte header with the payload size and element count
//! - the encoded records of every element not absorbed by an owner
//!
//! The expected position of each header is accumulated from the sizes
//! announced by earlier headers and checked against the real output cursor.

mod emitter;
mod error;

#[cfg(test)]
mod emit_tests;

pub use emitter::{Emitter, WrittenBlock, emit};
pub use error::EmitError;
