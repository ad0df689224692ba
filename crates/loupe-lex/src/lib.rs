//! loupe-lex - The profile-driven lexer.
//!
//! This crate turns a [`loupe_profile::Profile`] plus a source text into a
//! token stream. The pipeline inside:
//!
//! ```text
//! source text
//!      |
//!      v
//! [Reader] -- char-by-char traversal, line/column/offset tracking
//!      |
//!      v
//! [CompiledMatcher] -- per-rule scan functions measured at the cursor
//!      |
//!      v
//! [CompiledLexer] -- first-match-wins rule loop + [StateStack]
//!      |
//!      v
//! token stream (gap-free, overlap-free)
//! ```
//!
//! Matchers *measure* - they report how many characters they would consume
//! without moving the reader; the lexer commits a match by advancing. When
//! no rule matches, the lexer consumes exactly one character and emits an
//! `error` token, so progress is guaranteed on any input.
//!
//! Compilation happens once per profile ([`CompiledLexer::compile`]); the
//! result is immutable and safe to share across threads.

pub mod charclass;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod reader;
pub mod state;
pub mod token;

pub use charclass::CompiledClass;
pub use error::LexError;
pub use lexer::CompiledLexer;
pub use matcher::CompiledMatcher;
pub use reader::{Reader, ReaderSnapshot};
pub use state::StateStack;
pub use token::Token;
