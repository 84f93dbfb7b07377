//! Block writer with offset accounting.

use std::io::{Seek, Write};

use tplg_abi::format::{BlockHeader, BlockType, HEADER_SIZE};

use super::EmitError;
use crate::store::{Collection, Element, Payload, Store};

/// Header of a block as it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenBlock {
    pub offset: u64,
    pub header: BlockHeader,
}

/// Writes every emitted family of `store` to `out`.
///
/// `trace` receives one line per header and element write, prefixed with the
/// output offset.
pub fn emit<W: Write + Seek>(
    store: &Store,
    out: &mut W,
    trace: Option<&mut dyn Write>,
) -> Result<Vec<WrittenBlock>, EmitError> {
    let mut emitter = Emitter::new(out, trace)?;
    emitter.write_family(&store.mixers, |e| e.name.as_str())?;
    emitter.write_family(&store.enums, |e| e.name.as_str())?;
    emitter.write_family(&store.bytes, |e| e.name.as_str())?;
    emitter.write_family(&store.widgets, |e| e.name.as_str())?;
    emitter.write_family(&store.pcms, |e| e.name.as_str())?;
    emitter.write_family(&store.backends, |e| e.name.as_str())?;
    emitter.write_family(&store.codec_links, |e| e.name.as_str())?;
    emitter.write_family(&store.routes, |e| e.data.source.as_str())?;
    Ok(emitter.finish())
}

pub struct Emitter<'w, 't, W> {
    out: &'w mut W,
    trace: Option<&'t mut dyn Write>,
    /// Where the next header must start.
    next_hdr_pos: u64,
    blocks: Vec<WrittenBlock>,
}

impl<'w, 't, W: Write + Seek> Emitter<'w, 't, W> {
    /// Starts at the current position of `out`.
    pub fn new(out: &'w mut W, trace: Option<&'t mut dyn Write>) -> Result<Self, EmitError> {
        let next_hdr_pos = out.stream_position()?;
        Ok(Self {
            out,
            trace,
            next_hdr_pos,
            blocks: Vec::new(),
        })
    }

    /// Writes one block per grouping index of `family`, skipping empty ones.
    /// `label` names an element in the trace.
    pub fn write_family<T: Payload>(
        &mut self,
        family: &Collection<T>,
        label: impl Fn(&Element<T>) -> &str,
    ) -> Result<(), EmitError> {
        let Some(block) = family.kind().block_type() else {
            return Ok(());
        };
        for index in family.indices() {
            let elements: Vec<&Element<T>> = family.emitted().filter(|e| e.index == index).collect();
            self.write_block(block, index, &elements, &label)?;
        }
        Ok(())
    }

    fn write_block<T: Payload>(
        &mut self,
        block: BlockType,
        index: u32,
        elements: &[&Element<T>],
        label: &impl Fn(&Element<T>) -> &str,
    ) -> Result<(), EmitError> {
        let size: u64 = elements.iter().map(|e| e.encoded_size() as u64).sum();
        if size == 0 {
            return Ok(());
        }
        let payload_size = header_field(block, "payload", size)?;
        let count = header_field(block, "element count", elements.len() as u64)?;

        self.trace_line(format_args!(" block size for type {} is {}", block.as_u32(), size))?;
        self.write_header(BlockHeader::new(block, index, payload_size, count))?;

        let mut written = 0u64;
        for &element in elements {
            let bytes = element.encode();
            self.trace_line(format_args!(
                " {} '{}': write {} bytes",
                block.object_name(),
                label(element),
                element.encoded_size()
            ))?;
            self.out.write_all(&bytes)?;
            written += bytes.len() as u64;
        }

        if written != size {
            return Err(EmitError::SizeMismatch {
                block,
                expected: size,
                written,
            });
        }
        tracing::debug!(block = %block, index, count, size, "wrote block");
        Ok(())
    }

    fn write_header(&mut self, header: BlockHeader) -> Result<(), EmitError> {
        let offset = self.out.stream_position()?;
        if offset != self.next_hdr_pos {
            return Err(EmitError::OffsetMismatch {
                expected: self.next_hdr_pos,
                actual: offset,
            });
        }

        self.trace_line(format_args!(
            " header type {} size {:#x}/{} vendor {} version {}",
            header.block_type, header.payload_size, header.payload_size, header.vendor_type, header.version
        ))?;
        self.next_hdr_pos += HEADER_SIZE as u64 + u64::from(header.payload_size);
        self.out.write_all(&header.to_bytes())?;
        self.blocks.push(WrittenBlock { offset, header });
        Ok(())
    }

    fn trace_line(&mut self, line: std::fmt::Arguments<'_>) -> Result<(), EmitError> {
        let Some(trace) = self.trace.as_mut() else {
            return Ok(());
        };
        let offset = self.out.stream_position()?;
        writeln!(trace, "0x{:06x}/{:06} -{}", offset, offset, line)?;
        Ok(())
    }

    pub fn finish(self) -> Vec<WrittenBlock> {
        self.blocks
    }
}

/// Narrows a block header field to its on-disk width.
pub(super) fn header_field(
    block: BlockType,
    what: &'static str,
    value: u64,
) -> Result<u32, EmitError> {
    u32::try_from(value).map_err(|_| EmitError::TooLarge { block, what, value })
}
