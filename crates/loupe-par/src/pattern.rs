//! Single-step pattern evaluation.
//!
//! A pattern step is tested against exactly one token here; walking the
//! step list (including the skip-until scan, which needs to look at the
//! *next* step) lives in the symbol detector.

use loupe_lex::Token;
use loupe_profile::PatternStep;
use rustc_hash::FxHashMap;

/// A recorded capture: the token's value and its compressed index.
#[derive(Clone, Debug)]
pub(crate) struct Capture {
    pub value: String,
    pub index: usize,
}

/// Captures recorded while matching one pattern.
pub(crate) type Captures = FxHashMap<String, Capture>;

/// Result of applying one step to one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The step matched and consumed the token.
    Matched,
    /// An optional step declined without consuming.
    Skipped,
    /// The step failed; the pattern fails with it.
    Failed,
}

/// Applies one step to the token at compressed index `index`.
///
/// Captures are recorded on match. A bare `Skip` step is not a per-token
/// test and always fails here - the detector intercepts skip steps before
/// calling this.
pub(crate) fn apply_step(
    step: &PatternStep,
    token: &Token,
    index: usize,
    captures: &mut Captures,
) -> StepOutcome {
    match step {
        PatternStep::Match {
            token: kind,
            value,
            capture,
        } => {
            if token.kind != *kind {
                return StepOutcome::Failed;
            }
            if let Some(value) = value {
                if token.value != *value {
                    return StepOutcome::Failed;
                }
            }
            if let Some(name) = capture {
                captures.insert(
                    name.clone(),
                    Capture {
                        value: token.value.clone(),
                        index,
                    },
                );
            }
            StepOutcome::Matched
        }
        PatternStep::Optional(inner) => match apply_step(inner, token, index, captures) {
            StepOutcome::Matched => StepOutcome::Matched,
            _ => StepOutcome::Skipped,
        },
        PatternStep::AnyOf(alternatives) => {
            for alternative in alternatives {
                if apply_step(alternative, token, index, captures) == StepOutcome::Matched {
                    return StepOutcome::Matched;
                }
            }
            StepOutcome::Failed
        }
        PatternStep::Skip { .. } => StepOutcome::Failed,
    }
}
