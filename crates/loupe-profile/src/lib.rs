//! loupe-profile - Language profiles and the profile registry.
//!
//! A *profile* is the complete declarative description of one language:
//! lexer states made of matcher rules, bracket-pair block rules, and
//! token-pattern symbol rules. Profiles are plain data - the engine in
//! `loupe-lex`/`loupe-par` interprets them at runtime, so adding a language
//! means adding data here, never writing scanning code.
//!
//! The crate has three parts:
//!
//! - [`schema`] - the profile data model (character classes, matchers,
//!   lexer rules, block rules, symbol patterns),
//! - [`registry`] - name/extension lookup over registered profiles,
//! - [`languages`] - the built-in profiles (javascript, typescript,
//!   python, markdown, toml, json).

pub mod languages;
pub mod registry;
pub mod schema;

pub use registry::Registry;
pub use schema::{
    BlockRule, BodyStyle, CharClass, EmbeddedRegion, IndentationConfig, LexRule, LexerConfig,
    Matcher, NumberOptions, PatternStep, Profile, SymbolRule, Transition, DEFAULT_SKIP_LIMIT,
    ERROR_CATEGORY, ERROR_TOKEN_TYPE, PLAIN_CATEGORY,
};
