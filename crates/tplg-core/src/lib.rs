#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Helpers shared by the topology format crate, the compiler and the CLI.
//!
//! - [`Colors`]: ANSI palette for block dumps
//! - [`utils`]: name suggestions for unresolved references

pub mod colors;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
