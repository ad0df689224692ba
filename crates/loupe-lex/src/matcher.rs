//! Matcher compilation and scanning.
//!
//! Each declarative [`Matcher`] compiles to a [`CompiledMatcher`] whose
//! [`scan`](CompiledMatcher::scan) reports how many characters it would
//! consume from the reader's current position - 0 means no match. Scanning
//! never advances the reader: the lexer commits a match by advancing
//! afterwards. The one apparent exception, [`CompiledMatcher::Sequence`],
//! advances only to measure its sub-matchers and restores the reader
//! before returning.

mod number;

use indexmap::IndexMap;
use loupe_profile::{CharClass, Matcher};
use regex::Regex;

use crate::charclass::CompiledClass;
use crate::error::LexError;
use crate::reader::Reader;

pub use number::CompiledNumber;

/// A word character for keyword-boundary purposes: ASCII letter, digit,
/// `_`, or `$`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Sorts literals longest-first so that prefix checks find the longest
/// match without backtracking.
fn sort_longest_first(mut literals: Vec<String>) -> Vec<String> {
    literals.sort_by(|a, b| b.len().cmp(&a.len()));
    literals
}

/// A matcher specification compiled to scan form.
#[derive(Clone, Debug)]
pub enum CompiledMatcher {
    /// Exact literals, longest first.
    Exact(Vec<String>),
    /// Keyword literals, longest first, with word boundaries enforced.
    Keywords(Vec<String>),
    /// A delimited region.
    Delimited {
        /// Opening literal.
        open: String,
        /// Closing literal.
        close: String,
        /// Escape character swallowing the next character.
        escape: Option<char>,
        /// Whether line terminators are allowed inside the region.
        multiline: bool,
        /// Whether recurrences of the open literal nest.
        nested: bool,
    },
    /// A start literal through end of line.
    Line {
        /// Introducing literal.
        start: String,
    },
    /// First-char class plus optional greedy rest class.
    CharSeq {
        /// Class for the first character.
        first: CompiledClass,
        /// Class for subsequent characters.
        rest: Option<CompiledClass>,
    },
    /// A numeric literal.
    Number(CompiledNumber),
    /// Ordered conjunction of sub-matchers.
    Sequence(Vec<CompiledMatcher>),
    /// Anchored regular expression.
    Regex(Box<Regex>),
}

impl CompiledMatcher {
    /// Compiles a matcher specification, resolving character classes
    /// through `classes`.
    pub fn compile(
        matcher: &Matcher,
        classes: &IndexMap<String, CharClass>,
    ) -> Result<Self, LexError> {
        match matcher {
            Matcher::Exact(options) => {
                if options.is_empty() || options.iter().any(String::is_empty) {
                    return Err(LexError::MalformedMatcher(
                        "exact matcher requires non-empty literals".to_string(),
                    ));
                }
                Ok(CompiledMatcher::Exact(sort_longest_first(options.clone())))
            }
            Matcher::Keywords(words) => {
                if words.is_empty() || words.iter().any(String::is_empty) {
                    return Err(LexError::MalformedMatcher(
                        "keyword matcher requires non-empty words".to_string(),
                    ));
                }
                Ok(CompiledMatcher::Keywords(sort_longest_first(words.clone())))
            }
            Matcher::Delimited {
                open,
                close,
                escape,
                multiline,
                nested,
            } => {
                if open.is_empty() || close.is_empty() {
                    return Err(LexError::MalformedMatcher(
                        "delimited matcher requires non-empty delimiters".to_string(),
                    ));
                }
                Ok(CompiledMatcher::Delimited {
                    open: open.clone(),
                    close: close.clone(),
                    escape: *escape,
                    multiline: *multiline,
                    nested: *nested,
                })
            }
            Matcher::Line { start } => {
                if start.is_empty() {
                    return Err(LexError::MalformedMatcher(
                        "line matcher requires a start literal".to_string(),
                    ));
                }
                Ok(CompiledMatcher::Line {
                    start: start.clone(),
                })
            }
            Matcher::CharSeq { first, rest } => Ok(CompiledMatcher::CharSeq {
                first: CompiledClass::compile(first, classes)?,
                rest: rest
                    .as_ref()
                    .map(|r| CompiledClass::compile(r, classes))
                    .transpose()?,
            }),
            Matcher::Number(options) => Ok(CompiledMatcher::Number(CompiledNumber::new(options))),
            Matcher::Sequence(parts) => {
                if parts.is_empty() {
                    return Err(LexError::MalformedMatcher(
                        "sequence matcher requires at least one part".to_string(),
                    ));
                }
                let parts = parts
                    .iter()
                    .map(|p| Self::compile(p, classes))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledMatcher::Sequence(parts))
            }
            Matcher::Regex(pattern) => {
                let anchored = format!(r"\A(?:{pattern})");
                let regex =
                    Regex::new(&anchored).map_err(|e| LexError::InvalidPattern(e.to_string()))?;
                Ok(CompiledMatcher::Regex(Box::new(regex)))
            }
        }
    }

    /// Measures how many characters this matcher would consume at the
    /// reader's current position. Returns 0 on no match. The reader
    /// position is unchanged when this returns.
    pub fn scan(&self, reader: &mut Reader) -> usize {
        match self {
            CompiledMatcher::Exact(options) => scan_exact(reader, options),
            CompiledMatcher::Keywords(words) => scan_keywords(reader, words),
            CompiledMatcher::Delimited {
                open,
                close,
                escape,
                multiline,
                nested,
            } => scan_delimited(reader, open, close, *escape, *multiline, *nested),
            CompiledMatcher::Line { start } => scan_line(reader, start),
            CompiledMatcher::CharSeq { first, rest } => scan_char_seq(reader, first, rest.as_ref()),
            CompiledMatcher::Number(options) => options.scan(reader.rest()),
            CompiledMatcher::Sequence(parts) => scan_sequence(reader, parts),
            CompiledMatcher::Regex(regex) => scan_regex(reader, regex),
        }
    }
}

fn scan_exact(reader: &Reader, options: &[String]) -> usize {
    options
        .iter()
        .find(|option| reader.starts_with(option))
        .map(|option| option.chars().count())
        .unwrap_or(0)
}

fn scan_keywords(reader: &Reader, words: &[String]) -> usize {
    // Boundary on the left: the previous character must be absent or a
    // non-word character.
    if reader.prev_char().is_some_and(is_word_char) {
        return 0;
    }
    for word in words {
        if !reader.starts_with(word) {
            continue;
        }
        // Boundary on the right.
        let follows = reader.rest()[word.len()..].chars().next();
        if follows.is_some_and(is_word_char) {
            continue;
        }
        return word.chars().count();
    }
    0
}

fn scan_delimited(
    reader: &Reader,
    open: &str,
    close: &str,
    escape: Option<char>,
    multiline: bool,
    nested: bool,
) -> usize {
    let rest = reader.rest();
    if !rest.starts_with(open) {
        return 0;
    }

    let mut depth = 1usize;
    let mut i = open.len();
    while i < rest.len() {
        let tail = &rest[i..];
        let c = match tail.chars().next() {
            Some(c) => c,
            None => break,
        };
        if escape == Some(c) {
            // The escape swallows the next character, whatever it is.
            i += c.len_utf8();
            if let Some(next) = rest[i..].chars().next() {
                i += next.len_utf8();
            }
            continue;
        }
        if nested && tail.starts_with(open) {
            depth += 1;
            i += open.len();
            continue;
        }
        if tail.starts_with(close) {
            depth -= 1;
            i += close.len();
            if depth == 0 {
                return rest[..i].chars().count();
            }
            continue;
        }
        if !multiline && (c == '\n' || c == '\r') {
            return 0;
        }
        i += c.len_utf8();
    }
    // Ran off the end before the close.
    0
}

fn scan_line(reader: &Reader, start: &str) -> usize {
    if !reader.starts_with(start) {
        return 0;
    }
    let mut count = start.chars().count();
    for c in reader.rest()[start.len()..].chars() {
        if c == '\n' || c == '\r' {
            break;
        }
        count += 1;
    }
    count
}

fn scan_char_seq(reader: &Reader, first: &CompiledClass, rest: Option<&CompiledClass>) -> usize {
    let mut chars = reader.rest().chars();
    match chars.next() {
        Some(c) if first.matches(c) => {}
        _ => return 0,
    }
    let mut count = 1;
    if let Some(rest) = rest {
        for c in chars {
            if !rest.matches(c) {
                break;
            }
            count += 1;
        }
    }
    count
}

fn scan_sequence(reader: &mut Reader, parts: &[CompiledMatcher]) -> usize {
    let saved = reader.snapshot();
    let mut total = 0;
    for part in parts {
        let n = part.scan(reader);
        if n == 0 {
            reader.restore(saved);
            return 0;
        }
        reader.advance_by(n);
        total += n;
    }
    reader.restore(saved);
    total
}

fn scan_regex(reader: &Reader, regex: &Regex) -> usize {
    regex
        .find(reader.rest())
        .map(|m| m.as_str().chars().count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_profile::NumberOptions;

    fn compile(matcher: Matcher) -> CompiledMatcher {
        CompiledMatcher::compile(&matcher, &IndexMap::new()).unwrap()
    }

    fn scan(matcher: &CompiledMatcher, source: &str) -> usize {
        let mut reader = Reader::new(source);
        let n = matcher.scan(&mut reader);
        // Scanning must never move the reader.
        assert_eq!(reader.offset(), 0);
        n
    }

    #[test]
    fn test_exact_prefers_longest() {
        let m = compile(Matcher::any_of(["=", "==", "==="]));
        assert_eq!(scan(&m, "=== x"), 3);
        assert_eq!(scan(&m, "== x"), 2);
        assert_eq!(scan(&m, "= x"), 1);
        assert_eq!(scan(&m, "x"), 0);
    }

    #[test]
    fn test_keywords_enforce_boundaries() {
        let m = compile(Matcher::keywords(["for", "format"]));
        assert_eq!(scan(&m, "for x"), 3);
        // Longest listed literal wins when both bound.
        assert_eq!(scan(&m, "format("), 6);
        // No boundary on the right.
        assert_eq!(scan(&m, "formats"), 0);

        // No boundary on the left.
        let mut reader = Reader::new("xfor y");
        reader.advance();
        assert_eq!(m.scan(&mut reader), 0);

        // Non-word neighbors are fine.
        let mut reader = Reader::new("(for)");
        reader.advance();
        assert_eq!(m.scan(&mut reader), 3);
    }

    #[test]
    fn test_delimited_single_line() {
        let m = compile(Matcher::Delimited {
            open: "\"".to_string(),
            close: "\"".to_string(),
            escape: Some('\\'),
            multiline: false,
            nested: false,
        });
        assert_eq!(scan(&m, "\"hi\" rest"), 4);
        assert_eq!(scan(&m, "\"a\\\"b\""), 6);
        // Newline inside a single-line region fails.
        assert_eq!(scan(&m, "\"a\nb\""), 0);
        // Unterminated fails.
        assert_eq!(scan(&m, "\"abc"), 0);
        // Escape at end of input leaves the region unterminated.
        assert_eq!(scan(&m, "\"abc\\"), 0);
    }

    #[test]
    fn test_delimited_multiline_and_nested() {
        let m = compile(Matcher::Delimited {
            open: "/*".to_string(),
            close: "*/".to_string(),
            escape: None,
            multiline: true,
            nested: true,
        });
        assert_eq!(scan(&m, "/* a\nb */ x"), 9);
        assert_eq!(scan(&m, "/* a /* b */ c */ x"), 17);
        assert_eq!(scan(&m, "/* a /* b */"), 0);
    }

    #[test]
    fn test_delimited_counts_chars_not_bytes() {
        let m = compile(Matcher::delimited("\"", "\""));
        // Two delimiters plus two characters, four bytes of content.
        assert_eq!(scan(&m, "\"αβ\""), 4);
    }

    #[test]
    fn test_line_excludes_terminator() {
        let m = compile(Matcher::line("//"));
        assert_eq!(scan(&m, "// note\nrest"), 7);
        assert_eq!(scan(&m, "// note"), 7);
        assert_eq!(scan(&m, "//"), 2);
        assert_eq!(scan(&m, "/ x"), 0);
    }

    #[test]
    fn test_char_seq() {
        let m = compile(Matcher::char_seq(
            CharClass::Letter,
            Some(CharClass::union([CharClass::Letter, CharClass::Digit])),
        ));
        assert_eq!(scan(&m, "abc123 rest"), 6);
        assert_eq!(scan(&m, "a"), 1);
        assert_eq!(scan(&m, "1abc"), 0);

        let single = compile(Matcher::char_seq(CharClass::Digit, None));
        assert_eq!(scan(&single, "123"), 1);
    }

    #[test]
    fn test_sequence_measures_and_restores() {
        let m = compile(Matcher::Sequence(vec![
            Matcher::exact("r"),
            Matcher::delimited("\"", "\""),
        ]));
        assert_eq!(scan(&m, "r\"raw\" x"), 6);
        assert_eq!(scan(&m, "r x"), 0);
        assert_eq!(scan(&m, "\"raw\""), 0);
    }

    #[test]
    fn test_regex_is_anchored() {
        let m = compile(Matcher::Regex("[0-9]+px".to_string()));
        assert_eq!(scan(&m, "12px wide"), 4);
        assert_eq!(scan(&m, "width 12px"), 0);
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let err = CompiledMatcher::compile(&Matcher::Regex("(".to_string()), &IndexMap::new())
            .unwrap_err();
        assert!(matches!(err, LexError::InvalidPattern(_)));
    }

    #[test]
    fn test_empty_literal_lists_are_config_errors() {
        for matcher in [Matcher::Exact(vec![]), Matcher::Keywords(vec![]), Matcher::Sequence(vec![])]
        {
            let err = CompiledMatcher::compile(&matcher, &IndexMap::new()).unwrap_err();
            assert!(matches!(err, LexError::MalformedMatcher(_)));
        }
    }

    #[test]
    fn test_number_through_matcher() {
        let m = compile(Matcher::Number(NumberOptions {
            hex: true,
            octal: false,
            binary: false,
            float: true,
            separator: Some('_'),
            suffixes: vec!["n".to_string()],
        }));
        assert_eq!(scan(&m, "0xFF;"), 4);
        assert_eq!(scan(&m, "1_000n;"), 6);
        assert_eq!(scan(&m, "3.14."), 4);
        assert_eq!(scan(&m, "x"), 0);
    }
}
