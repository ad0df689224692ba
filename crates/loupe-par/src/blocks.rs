//! Bracket-pair tracking.
//!
//! Walks a token stream matching the profile's bracket pairs by token
//! *value*, producing spans with nesting depth. The tracker is built for
//! broken input: an unmatched close is dropped, an unclosed open produces
//! no span, and a close whose nearest frames belong to other rules
//! truncates past them.

use loupe_lex::Token;
use loupe_profile::BlockRule;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// A matched bracket pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSpan {
    /// Name of the block rule that matched.
    pub name: String,
    /// Token-stream index of the opening token.
    pub open_index: usize,
    /// Token-stream index of the closing token.
    pub close_index: usize,
    /// Number of enclosing open frames when this block opened.
    pub depth: usize,
}

struct Frame<'a> {
    rule: &'a BlockRule,
    open_index: usize,
    depth: usize,
}

/// Matches bracket pairs over a token stream.
///
/// Returns the spans sorted by `open_index`. When two rules share an open
/// literal the first rule in profile order wins; a rule whose open and
/// close literals are identical (markdown fences) toggles, because a
/// close frame is looked for before a new open is pushed.
pub fn track_blocks(tokens: &[Token], rules: &[BlockRule]) -> Vec<BlockSpan> {
    let mut open_table: FxHashMap<&str, &BlockRule> = FxHashMap::default();
    let mut close_literals: FxHashSet<&str> = FxHashSet::default();
    for rule in rules {
        open_table.entry(rule.open.as_str()).or_insert(rule);
        close_literals.insert(rule.close.as_str());
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut spans = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let value = token.value.as_str();

        if close_literals.contains(value) {
            // Close the nearest frame whose rule closes with this literal,
            // discarding any unmatched opens stacked above it.
            if let Some(at) = stack.iter().rposition(|frame| frame.rule.close == value) {
                let frame = &stack[at];
                spans.push(BlockSpan {
                    name: frame.rule.name.clone(),
                    open_index: frame.open_index,
                    close_index: index,
                    depth: frame.depth,
                });
                stack.truncate(at);
                continue;
            }
            // No frame wants it: maybe it opens a block of its own,
            // otherwise it is silently dropped.
        }

        if let Some(rule) = open_table.get(value) {
            stack.push(Frame {
                rule,
                open_index: index,
                depth: stack.len(),
            });
        }
    }

    spans.sort_by_key(|span| span.open_index);
    spans
}
