//! Compiler for ALSA SoC topology configurations.
//!
//! The pipeline runs in four passes over one [`Topology`] build context:
//! - `conf` - configuration text to an owned [`conf::ConfigNode`] tree
//! - `sections` - section dispatch, one typed element per declaration
//! - `build` - reference resolution and absorption of shared leaves
//! - `emit` - binary blocks with offset and size accounting
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tplg_compiler::Topology;
//!
//! let source = r#"
//!     SectionControlMixer."Master" {
//!         channel."FL" { reg 0 shift 0 }
//!         max 31
//!     }
//! "#;
//!
//! let mut out = Cursor::new(Vec::new());
//! Topology::new().build(source, &mut out).expect("valid topology");
//! assert_eq!(out.get_ref().len(), 36 + 228);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod conf;
pub mod diagnostics;
pub mod emit;
pub mod sections;
pub mod store;
mod topology;

#[cfg(test)]
pub mod test_utils;

use std::io;
use std::path::PathBuf;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::EmitError;
pub use topology::Topology;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (like the recursion limit) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// `EINVAL`: malformed input or dangling reference.
pub const EINVAL: i32 = 22;
/// `EIO`: short or failed write.
pub const EIO: i32 = 5;

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot access `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input nested too deeply.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("configuration parsing failed with {} errors", .0.error_count())]
    ConfigParse(Diagnostics),

    #[error("topology parsing failed with {} errors", .0.error_count())]
    SectionParse(Diagnostics),

    #[error("topology integrity check failed with {} errors", .0.error_count())]
    Link(Diagnostics),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl Error {
    /// Negative errno-style code for callers that speak the C convention.
    pub fn errno(&self) -> i32 {
        match self {
            Self::Io { source, .. } => -source.raw_os_error().unwrap_or(EIO),
            Self::RecursionLimitExceeded
            | Self::ConfigParse(_)
            | Self::SectionParse(_)
            | Self::Link(_) => -EINVAL,
            Self::Emit(err) => err.errno(),
        }
    }

    /// True when the compiler's own size accounting went wrong, not the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Emit(err) if err.is_internal())
    }

    /// Diagnostics carried by input-level failures.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::ConfigParse(d) | Self::SectionParse(d) | Self::Link(d) => Some(d),
            _ => None,
        }
    }
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;
