//! The symbol detector.
//!
//! Runs each profile symbol rule's token pattern over a skip-filtered view
//! of the token stream, then measures where the matched symbol's content
//! ends according to the rule's body style. Positions consumed by one
//! match are claimed and never re-used by later rules or later starts.

use loupe_lex::Token;
use loupe_profile::{BodyStyle, PatternStep, Profile, SymbolRule};
use loupe_util::Range;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::blocks::{track_blocks, BlockSpan};
use crate::pattern::{apply_step, Captures, StepOutcome};

/// A detected structural symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSymbol {
    /// The `name` capture's value, or the rule name if nothing was
    /// captured.
    pub name: String,
    /// The rule's kind tag (`function`, `class`, `heading`, ...).
    pub kind: String,
    /// Range of the name token.
    pub name_range: Range,
    /// Range from the first matched token to the end of the measured
    /// content. Always contains `name_range`.
    pub content_range: Range,
}

/// One successful pattern match over the compressed stream.
struct PatternMatch {
    /// First consumed compressed index.
    first: usize,
    /// Last consumed compressed index.
    last: usize,
    captures: Captures,
}

/// Extracts symbols from a token stream according to the profile's symbol
/// rules.
///
/// Results are sorted by content start (line, then column).
pub fn extract_symbols(tokens: &[Token], profile: &Profile) -> Vec<CodeSymbol> {
    let skip: FxHashSet<&str> = profile.lexer.skip.iter().map(String::as_str).collect();
    // Compressed view: indices of tokens visible to patterns, in order.
    let compressed: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !skip.contains(token.kind.as_str()))
        .map(|(index, _)| index)
        .collect();

    let blocks = track_blocks(tokens, &profile.blocks);
    let mut claimed = vec![false; compressed.len()];
    let mut symbols = Vec::new();

    for rule in &profile.symbols {
        let mut start = 0;
        while start < compressed.len() {
            if claimed[start] {
                start += 1;
                continue;
            }
            match match_pattern(&rule.pattern, start, &compressed, tokens) {
                Some(matched) => {
                    for index in matched.first..=matched.last {
                        claimed[index] = true;
                    }
                    symbols.push(build_symbol(rule, &matched, &compressed, tokens, &blocks));
                    start = matched.last + 1;
                }
                None => start += 1,
            }
        }
    }

    symbols.sort_by_key(|symbol| {
        (
            symbol.content_range.start.line,
            symbol.content_range.start.column,
        )
    });
    symbols
}

/// Attempts one rule pattern at compressed position `start`.
fn match_pattern(
    steps: &[PatternStep],
    start: usize,
    compressed: &[usize],
    tokens: &[Token],
) -> Option<PatternMatch> {
    let mut pos = start;
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;
    let mut captures = Captures::default();

    let mut i = 0;
    while i < steps.len() {
        match &steps[i] {
            PatternStep::Skip { max_tokens } => {
                // The step after the skip is the sentinel the scan looks
                // for; consecutive skips collapse into one.
                let mut sentinel_at = i + 1;
                while matches!(steps.get(sentinel_at), Some(PatternStep::Skip { .. })) {
                    sentinel_at += 1;
                }
                let sentinel = steps.get(sentinel_at)?;

                let limit = pos.checked_add(*max_tokens)?.min(compressed.len());
                let hit = (pos..limit).find(|&k| {
                    apply_step(sentinel, &tokens[compressed[k]], k, &mut captures)
                        == StepOutcome::Matched
                })?;

                first.get_or_insert(pos);
                last = Some(hit);
                pos = hit + 1;
                // The sentinel step was consumed by the scan.
                i = sentinel_at + 1;
            }
            step => {
                if pos >= compressed.len() {
                    // Only an optional step can decline at end of stream.
                    if matches!(step, PatternStep::Optional(_)) {
                        i += 1;
                        continue;
                    }
                    return None;
                }
                match apply_step(step, &tokens[compressed[pos]], pos, &mut captures) {
                    StepOutcome::Matched => {
                        first.get_or_insert(pos);
                        last = Some(pos);
                        pos += 1;
                        i += 1;
                    }
                    StepOutcome::Skipped => i += 1,
                    StepOutcome::Failed => return None,
                }
            }
        }
    }

    // A pattern that consumed nothing produces no symbol.
    Some(PatternMatch {
        first: first?,
        last: last?,
        captures,
    })
}

fn build_symbol(
    rule: &SymbolRule,
    matched: &PatternMatch,
    compressed: &[usize],
    tokens: &[Token],
    blocks: &[BlockSpan],
) -> CodeSymbol {
    let start_original = compressed[matched.first];
    let last_original = compressed[matched.last];

    let content_end = if rule.has_body {
        match rule.body_style {
            BodyStyle::Braces => braces_end(blocks, last_original),
            BodyStyle::Indentation => indentation_end(tokens, start_original, last_original),
            BodyStyle::MarkupBlock => markup_block_end(tokens, last_original),
            BodyStyle::EndKeyword => {
                end_keyword_end(tokens, last_original, rule.end_keyword.as_deref())
            }
        }
    } else {
        statement_end(tokens, last_original)
    };

    let (name, name_range) = match matched.captures.get("name") {
        Some(capture) => (capture.value.clone(), tokens[compressed[capture.index]].range),
        None => (rule.name.clone(), tokens[start_original].range),
    };

    CodeSymbol {
        name,
        kind: rule.kind.clone(),
        name_range,
        content_range: Range::new(
            tokens[start_original].range.start,
            tokens[content_end].range.end,
        ),
    }
}

/// Braces body: the first `braces` block opening at or after the match.
fn braces_end(blocks: &[BlockSpan], last_original: usize) -> usize {
    blocks
        .iter()
        .find(|span| span.name == "braces" && span.open_index >= last_original)
        .map(|span| span.close_index)
        .unwrap_or(last_original)
}

/// Indentation body: content extends while non-layout tokens sit to the
/// right of the symbol's start column.
fn indentation_end(tokens: &[Token], start_original: usize, last_original: usize) -> usize {
    let base_column = tokens[start_original].range.start.column;
    let mut last_body = None;
    for (index, token) in tokens.iter().enumerate().skip(last_original + 1) {
        if token.is_blank() {
            continue;
        }
        if token.range.start.column > base_column {
            last_body = Some(index);
        } else {
            break;
        }
    }
    last_body.unwrap_or(last_original)
}

/// Markup body: content extends to the next blank line (two adjacent
/// newline tokens).
fn markup_block_end(tokens: &[Token], last_original: usize) -> usize {
    let mut last_content = None;
    for (index, token) in tokens.iter().enumerate().skip(last_original + 1) {
        if token.is_newline()
            && tokens
                .get(index + 1)
                .is_some_and(|next| next.is_newline())
        {
            break;
        }
        if !token.is_blank() {
            last_content = Some(index);
        }
    }
    last_content.unwrap_or(last_original)
}

/// End-keyword body: the next `keyword` token with the configured value at
/// bracket depth 0.
fn end_keyword_end(tokens: &[Token], last_original: usize, keyword: Option<&str>) -> usize {
    let Some(keyword) = keyword else {
        return last_original;
    };
    let mut depth = 0i32;
    for (index, token) in tokens.iter().enumerate().skip(last_original + 1) {
        adjust_depth(&mut depth, token);
        if depth == 0 && token.kind == "keyword" && token.value == keyword {
            return index;
        }
    }
    last_original
}

/// Body-less symbols: content runs to the next `;` at bracket depth 0, or
/// to the last non-layout token before a depth-0 newline.
fn statement_end(tokens: &[Token], last_original: usize) -> usize {
    let mut depth = 0i32;
    let mut last_solid = last_original;
    for (index, token) in tokens.iter().enumerate().skip(last_original + 1) {
        adjust_depth(&mut depth, token);
        if depth == 0 {
            if token.value == ";" {
                return index;
            }
            if token.is_newline() {
                return last_solid;
            }
        }
        if !token.is_blank() {
            last_solid = index;
        }
    }
    last_solid
}

fn adjust_depth(depth: &mut i32, token: &Token) {
    match token.value.as_str() {
        "{" | "(" | "[" => *depth += 1,
        "}" | ")" | "]" => *depth -= 1,
        _ => {}
    }
}
