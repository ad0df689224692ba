//! loupe-par - The structure parser.
//!
//! Consumes the token stream produced by `loupe-lex` and finds structure
//! in it, without building a syntax tree:
//!
//! - [`blocks`] matches bracket pairs declared by the profile into
//!   [`BlockSpan`]s, tolerating mismatched closes,
//! - [`symbols`] runs the profile's declarative token patterns and
//!   measures each matched symbol's content extent, producing
//!   [`CodeSymbol`]s.
//!
//! Both walk the same token stream but are otherwise independent; the
//! symbol detector consults block spans only to measure brace-delimited
//! bodies.

pub mod blocks;
mod pattern;
pub mod symbols;

pub use blocks::{track_blocks, BlockSpan};
pub use symbols::{extract_symbols, CodeSymbol};
