//! loupe-util - Foundation types for the loupe engine.
//!
//! This crate provides the source-location types shared by every phase of
//! the pipeline: [`Position`] (line/column/byte-offset triple) and
//! [`Range`] (a start/end pair). Tokens, block spans, and code symbols all
//! carry these, so the conventions are fixed here once:
//!
//! - lines are 1-based,
//! - columns are 0-based and count *characters*,
//! - offsets are 0-based and count *bytes*.

pub mod span;

pub use span::{Position, Range};
