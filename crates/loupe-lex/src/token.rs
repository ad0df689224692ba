//! The token type produced by the lexer.

use loupe_util::Range;
use serde::Serialize;

/// One classified slice of source text.
///
/// Tokens cover the source without gaps or overlap: concatenating the
/// `value`s of a token stream reproduces the input byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token type name from the profile (the synthetic `error` type when no
    /// rule matched).
    #[serde(rename = "type")]
    pub kind: String,
    /// The exact source slice.
    pub value: String,
    /// Highlighting category from the profile's type table (`plain` when
    /// the type is unlisted, `error` for error tokens).
    pub category: String,
    /// Source range covered by the value.
    pub range: Range,
}

impl Token {
    /// True when the value consists entirely of spaces, tabs, and line
    /// terminators. The structure parser uses this to step over layout
    /// tokens without caring what the profile named them.
    pub fn is_blank(&self) -> bool {
        !self.value.is_empty()
            && self
                .value
                .chars()
                .all(|c| c == ' ' || c == '\t' || c == '\n' || c == '\r')
    }

    /// True when the value consists entirely of line terminators.
    pub fn is_newline(&self) -> bool {
        !self.value.is_empty() && self.value.chars().all(|c| c == '\n' || c == '\r')
    }
}
