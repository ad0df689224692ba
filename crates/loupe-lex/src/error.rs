//! Lexer error types.
//!
//! All of these are *configuration* errors: a malformed or inconsistent
//! profile detected while compiling it or while driving the state machine.
//! Unrecognized source text is never an error - the lexer emits `error`
//! tokens and keeps going.

use thiserror::Error;

/// Fatal profile-configuration errors raised by the lexer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A transition targeted (or the profile started in) a state that does
    /// not exist.
    #[error("unknown lexer state '{0}'")]
    UnknownState(String),

    /// A named character class was not found in the profile's class table.
    #[error("unresolved character class reference '{0}'")]
    UnresolvedClass(String),

    /// Named character classes refer to each other in a cycle.
    #[error("circular character class reference through '{0}'")]
    CircularClass(String),

    /// A regex matcher failed to compile.
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// A matcher specification that cannot match anything (empty literal
    /// list, empty sequence, empty delimiter).
    #[error("malformed matcher: {0}")]
    MalformedMatcher(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LexError::UnknownState("interp".to_string()).to_string(),
            "unknown lexer state 'interp'"
        );
        assert_eq!(
            LexError::UnresolvedClass("identStart".to_string()).to_string(),
            "unresolved character class reference 'identStart'"
        );
    }
}
