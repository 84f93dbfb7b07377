//! Reference linker: resolves named references between declarations.
//!
//! Runs one pass per family in a fixed order (controls, widgets, PCM
//! descriptions, routes). A pass first resolves against a shared view of the
//! store, then writes the resolved content into the referencing records and
//! marks what they absorbed. Every problem of a pass is reported before the
//! linker stops.

mod link;

#[cfg(test)]
mod link_tests;

pub use link::link;
