//! Human-readable listing of a compiled topology file.
//!
//! One line per block header, then one indented line per element:
//!
//! ```text
//! 0x000000 mixer index=0 count=2 payload=456
//! 0x000024   "vol1" 228
//! ```

use std::fmt::Write as _;

use tplg_core::Colors;

use crate::file::{Block, TopologyFile};

pub fn dump(file: &TopologyFile, colors: Colors) -> String {
    let mut out = String::new();
    for block in file.blocks() {
        dump_block(&mut out, file, block, colors);
    }
    out
}

fn dump_block(out: &mut String, file: &TopologyFile, block: &Block, c: Colors) {
    let h = &block.header;
    let kind = match h.kind() {
        Some(kind) => kind.to_string(),
        None => format!("type{}", h.block_type),
    };
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} {} index={} count={} payload={}",
        c.paint(c.offset, format_args!("{:#08x}", block.offset)),
        c.paint(c.kind, kind),
        h.index,
        h.count,
        h.payload_size
    );

    let records = match file.records(block) {
        Ok(records) => records,
        Err(err) => {
            let note = format!("<undecodable: {}>", err);
            let _ = writeln!(out, "           {}", c.paint(c.offset, note));
            return;
        }
    };

    let mut offset = block.payload_offset();
    for record in records {
        let len = record.encoded_len();
        let _ = writeln!(
            out,
            "{}   {} {}",
            c.paint(c.offset, format_args!("{:#08x}", offset)),
            c.paint(c.name, format_args!("\"{}\"", record.label())),
            len
        );
        offset += len as u64;
    }
}
