//! The profile data model.
//!
//! Everything in this module is data: tagged enums and plain structs that a
//! profile author combines into a [`Profile`]. The engine compiles and
//! interprets these; none of the variants carry behavior of their own.
//!
//! The constructor helpers (`Matcher::exact`, `PatternStep::capture`, ...)
//! exist purely to keep the language definitions in [`crate::languages`]
//! readable - they build the same structs you could write out longhand.

use indexmap::IndexMap;

/// Token type emitted by the lexer when no rule matches.
pub const ERROR_TOKEN_TYPE: &str = "error";

/// Category attached to [`ERROR_TOKEN_TYPE`] tokens.
pub const ERROR_CATEGORY: &str = "error";

/// Category used for token types missing from the profile's type table.
pub const PLAIN_CATEGORY: &str = "plain";

/// Default bound for [`PatternStep::Skip`] when none is given.
pub const DEFAULT_SKIP_LIMIT: usize = 50;

/// A single-character class expression.
///
/// Classes form a small algebra: predefined sets, explicit sets, inclusive
/// ranges, unions, negation, and named references resolved against the
/// profile's class table. The lexer compiles each class to a predicate once
/// per profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// ASCII `A-Z`/`a-z` plus the Latin-1 Supplement / Latin Extended range
    /// `\u{C0}..=\u{24F}`.
    Letter,
    /// ASCII `A-Z`.
    Upper,
    /// ASCII `a-z`.
    Lower,
    /// ASCII `0-9`.
    Digit,
    /// ASCII `0-9`, `a-f`, `A-F`.
    HexDigit,
    /// [`CharClass::Letter`] or [`CharClass::Digit`].
    Alphanumeric,
    /// Space and tab. Deliberately excludes line terminators.
    Whitespace,
    /// `\n` or `\r`.
    Newline,
    /// Any character. Still fails at end of input.
    Any,
    /// Exactly the characters of the string.
    Chars(String),
    /// An inclusive character range.
    CharRange(char, char),
    /// Matches if any member class matches.
    Union(Vec<CharClass>),
    /// Matches any character the inner class does not. Fails at end of
    /// input like every other class.
    Negate(Box<CharClass>),
    /// A reference into the profile's named class table. Unresolved names
    /// are a fatal configuration error at compile time.
    Named(String),
}

impl CharClass {
    /// An explicit character set.
    pub fn chars(set: &str) -> Self {
        CharClass::Chars(set.to_string())
    }

    /// A union of classes.
    pub fn union(classes: impl IntoIterator<Item = CharClass>) -> Self {
        CharClass::Union(classes.into_iter().collect())
    }

    /// The negation of a class.
    pub fn negate(inner: CharClass) -> Self {
        CharClass::Negate(Box::new(inner))
    }

    /// A reference to a named class in the profile's class table.
    pub fn named(name: &str) -> Self {
        CharClass::Named(name.to_string())
    }
}

/// Options for the numeric-literal matcher.
///
/// All prefixes are opt-in; a disabled prefix simply falls through to
/// decimal scanning. `separator` (typically `_`) is permitted between
/// digits but never counts as a digit itself. `suffixes` are consumed
/// longest-first after the digits (e.g. `n` for JavaScript BigInt).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberOptions {
    /// Recognize `0x`/`0X` hexadecimal literals.
    pub hex: bool,
    /// Recognize `0o`/`0O` octal literals.
    pub octal: bool,
    /// Recognize `0b`/`0B` binary literals.
    pub binary: bool,
    /// Accept a leading `.digit` form (e.g. `.5`).
    pub float: bool,
    /// Digit separator permitted between digits.
    pub separator: Option<char>,
    /// Literal suffixes tried longest-first after the digits.
    pub suffixes: Vec<String>,
}

/// A matcher specification: one way of consuming characters at the current
/// reader position.
///
/// Every variant compiles to a scan function that reports how many
/// characters it would consume (0 = no match) without advancing the reader.
#[derive(Clone, Debug, PartialEq)]
pub enum Matcher {
    /// One or more exact literals. Longest match wins regardless of list
    /// order.
    Exact(Vec<String>),
    /// Literals with word-boundary enforcement on both sides. A word
    /// character is an ASCII letter, digit, `_`, or `$`.
    Keywords(Vec<String>),
    /// A delimited region: open literal through the matching close literal.
    Delimited {
        /// Opening literal, required at the current position.
        open: String,
        /// Closing literal.
        close: String,
        /// Escape character; when present it swallows the next character.
        escape: Option<char>,
        /// Whether the region may span line terminators.
        multiline: bool,
        /// Whether recurrences of `open` nest (depth counting).
        nested: bool,
    },
    /// A start literal through the end of the line, exclusive of the
    /// terminator.
    Line {
        /// Literal that introduces the line region.
        start: String,
    },
    /// One character satisfying `first`, then greedily any number
    /// satisfying `rest`.
    CharSeq {
        /// Class the first character must satisfy.
        first: CharClass,
        /// Class for subsequent characters; absent means length is 1.
        rest: Option<CharClass>,
    },
    /// A numeric literal.
    Number(NumberOptions),
    /// An ordered conjunction of sub-matchers. The reader is restored after
    /// measuring, like every other matcher.
    Sequence(Vec<Matcher>),
    /// Escape hatch: a regular expression, compiled anchored to the current
    /// position.
    Regex(String),
}

impl Matcher {
    /// A single exact literal.
    pub fn exact(literal: &str) -> Self {
        Matcher::Exact(vec![literal.to_string()])
    }

    /// A list of exact literals, longest match winning.
    pub fn any_of<'a>(literals: impl IntoIterator<Item = &'a str>) -> Self {
        Matcher::Exact(literals.into_iter().map(str::to_string).collect())
    }

    /// A keyword list with word boundaries on both sides.
    pub fn keywords<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Matcher::Keywords(words.into_iter().map(str::to_string).collect())
    }

    /// A single-line delimited region with no escape.
    pub fn delimited(open: &str, close: &str) -> Self {
        Matcher::Delimited {
            open: open.to_string(),
            close: close.to_string(),
            escape: None,
            multiline: false,
            nested: false,
        }
    }

    /// A line region starting at `start`.
    pub fn line(start: &str) -> Self {
        Matcher::Line {
            start: start.to_string(),
        }
    }

    /// A character sequence: `first`, then greedily `rest`.
    pub fn char_seq(first: CharClass, rest: Option<CharClass>) -> Self {
        Matcher::CharSeq { first, rest }
    }
}

/// State transition attached to a lexer rule.
///
/// Exactly one transition applies per matched rule; `None` leaves the state
/// stack untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// No state change.
    #[default]
    None,
    /// Push a state onto the stack.
    Push(String),
    /// Pop the top state. Popping the last remaining state is a no-op.
    Pop,
    /// Replace the top of the stack.
    SwitchTo(String),
}

/// One rule inside a lexer state: a matcher, the token type it emits, and
/// an optional state transition.
#[derive(Clone, Debug, PartialEq)]
pub struct LexRule {
    /// The matcher to try.
    pub matcher: Matcher,
    /// Token type emitted on a match.
    pub token: String,
    /// State transition applied after emitting.
    pub transition: Transition,
}

impl LexRule {
    /// A rule with no state transition.
    pub fn new(matcher: Matcher, token: &str) -> Self {
        Self {
            matcher,
            token: token.to_string(),
            transition: Transition::None,
        }
    }

    /// Attach a push transition.
    pub fn pushes(mut self, state: &str) -> Self {
        self.transition = Transition::Push(state.to_string());
        self
    }

    /// Attach a pop transition.
    pub fn pops(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// Attach a switch transition.
    pub fn switches_to(mut self, state: &str) -> Self {
        self.transition = Transition::SwitchTo(state.to_string());
        self
    }
}

/// Indentation metadata carried by some profiles.
///
/// Accepted by the engine but not interpreted by the core; present so
/// profiles that declare it round-trip without error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentationConfig {
    /// Width a tab stop counts for.
    pub tab_width: u32,
}

/// The lexer half of a profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexerConfig {
    /// Named character classes, referenced via [`CharClass::Named`].
    pub classes: IndexMap<String, CharClass>,
    /// Token type -> highlighting category. Types missing here fall back
    /// to [`PLAIN_CATEGORY`].
    pub token_types: IndexMap<String, String>,
    /// Named states, each an ordered rule list. First match wins.
    pub states: IndexMap<String, Vec<LexRule>>,
    /// Name of the initial state.
    pub initial: String,
    /// Token types hidden from the structure parser.
    pub skip: Vec<String>,
    /// Optional indentation metadata (accepted, not interpreted).
    pub indentation: Option<IndentationConfig>,
}

/// A bracket pair tracked by the block tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRule {
    /// Rule name; block spans carry it and symbol rules refer to it.
    pub name: String,
    /// Opening literal, matched against token *values*.
    pub open: String,
    /// Closing literal, matched against token *values*.
    pub close: String,
}

impl BlockRule {
    /// Creates a block rule.
    pub fn new(name: &str, open: &str, close: &str) -> Self {
        Self {
            name: name.to_string(),
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// One step of a symbol rule's token pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternStep {
    /// Match one token by type, optionally by exact value, optionally
    /// recording it under a capture name.
    Match {
        /// Required token type.
        token: String,
        /// Required token value, if any.
        value: Option<String>,
        /// Capture name to record the token under, if any.
        capture: Option<String>,
    },
    /// Scan forward (bounded) until the next pattern step matches; the
    /// matched sentinel token is consumed along with this step.
    Skip {
        /// Maximum number of (non-skip-type) tokens to scan.
        max_tokens: usize,
    },
    /// Try the inner step once; never fails.
    Optional(Box<PatternStep>),
    /// Try each alternative in order; first success wins.
    AnyOf(Vec<PatternStep>),
}

impl PatternStep {
    /// Match a token by type only.
    pub fn token(token: &str) -> Self {
        PatternStep::Match {
            token: token.to_string(),
            value: None,
            capture: None,
        }
    }

    /// Match a token by type and exact value.
    pub fn value(token: &str, value: &str) -> Self {
        PatternStep::Match {
            token: token.to_string(),
            value: Some(value.to_string()),
            capture: None,
        }
    }

    /// Match a token by type and record it under a capture name.
    pub fn capture(token: &str, capture: &str) -> Self {
        PatternStep::Match {
            token: token.to_string(),
            value: None,
            capture: Some(capture.to_string()),
        }
    }

    /// A skip step with the default bound.
    pub fn skip() -> Self {
        PatternStep::Skip {
            max_tokens: DEFAULT_SKIP_LIMIT,
        }
    }

    /// A skip step with an explicit bound.
    pub fn skip_up_to(max_tokens: usize) -> Self {
        PatternStep::Skip { max_tokens }
    }

    /// An optional step.
    pub fn optional(step: PatternStep) -> Self {
        PatternStep::Optional(Box::new(step))
    }

    /// A choice among steps.
    pub fn any_of(steps: impl IntoIterator<Item = PatternStep>) -> Self {
        PatternStep::AnyOf(steps.into_iter().collect())
    }
}

/// Policy for measuring where a symbol's content ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyStyle {
    /// Content runs to the close of the next `braces` block span.
    #[default]
    Braces,
    /// Content runs while following tokens are indented past the symbol's
    /// start column.
    Indentation,
    /// Content runs to the next blank line.
    MarkupBlock,
    /// Content runs to the next `keyword` token with the rule's
    /// `end_keyword` value at bracket depth 0.
    EndKeyword,
}

/// A declarative symbol rule: a token pattern plus body measurement policy.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolRule {
    /// Rule name; used as the symbol name when no `name` capture matched.
    pub name: String,
    /// Symbol kind reported on matches (e.g. `function`, `class`).
    pub kind: String,
    /// Ordered pattern steps.
    pub pattern: Vec<PatternStep>,
    /// Whether the symbol has a body to measure.
    pub has_body: bool,
    /// How the body extent is measured when `has_body` is set.
    pub body_style: BodyStyle,
    /// Keyword terminating an [`BodyStyle::EndKeyword`] body.
    pub end_keyword: Option<String>,
    /// Whether the symbol may nest (accepted, not interpreted).
    pub nested: bool,
}

impl SymbolRule {
    /// A body-less rule; content ends at the next statement boundary.
    pub fn new(name: &str, kind: &str, pattern: Vec<PatternStep>) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            pattern,
            has_body: false,
            body_style: BodyStyle::default(),
            end_keyword: None,
            nested: false,
        }
    }

    /// Mark the rule as having a body measured by `style`.
    pub fn with_body(mut self, style: BodyStyle) -> Self {
        self.has_body = true;
        self.body_style = style;
        self
    }

    /// Set the terminating keyword for an end-keyword body.
    pub fn with_end_keyword(mut self, keyword: &str) -> Self {
        self.has_body = true;
        self.body_style = BodyStyle::EndKeyword;
        self.end_keyword = Some(keyword.to_string());
        self
    }

    /// Mark the rule as nestable.
    pub fn allow_nested(mut self) -> Self {
        self.nested = true;
        self
    }
}

/// An embedded-language region declaration.
///
/// Carried in profile data for downstream consumers; the core engine
/// accepts it without interpreting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedRegion {
    /// Token type whose content holds the embedded language.
    pub token: String,
    /// Language identifier of the embedded content.
    pub language: String,
}

/// The complete declarative description of one language.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// Profile name, used as the primary registry key.
    pub name: String,
    /// File extensions (dot included) resolving to this profile.
    pub extensions: Vec<String>,
    /// Lexer configuration.
    pub lexer: LexerConfig,
    /// Bracket pairs for the block tracker.
    pub blocks: Vec<BlockRule>,
    /// Symbol rules, applied in order.
    pub symbols: Vec<SymbolRule>,
    /// Parent profile name (accepted, not interpreted by the core).
    pub inherits: Option<String>,
    /// Embedded-language regions (accepted, not interpreted by the core).
    pub embedded: Vec<EmbeddedRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_helpers() {
        assert_eq!(Matcher::exact("{"), Matcher::Exact(vec!["{".to_string()]));
        assert_eq!(
            Matcher::any_of(["==", "="]),
            Matcher::Exact(vec!["==".to_string(), "=".to_string()])
        );
        assert_eq!(
            Matcher::line("//"),
            Matcher::Line {
                start: "//".to_string()
            }
        );
    }

    #[test]
    fn test_delimited_helper_defaults() {
        let m = Matcher::delimited("\"", "\"");
        match m {
            Matcher::Delimited {
                escape,
                multiline,
                nested,
                ..
            } => {
                assert_eq!(escape, None);
                assert!(!multiline);
                assert!(!nested);
            }
            other => panic!("expected delimited, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_rule_transitions() {
        let rule = LexRule::new(Matcher::exact("`"), "templateOpen").pushes("template");
        assert_eq!(rule.transition, Transition::Push("template".to_string()));

        let rule = LexRule::new(Matcher::exact("`"), "templateClose").pops();
        assert_eq!(rule.transition, Transition::Pop);

        let rule = LexRule::new(Matcher::exact("x"), "x").switches_to("other");
        assert_eq!(rule.transition, Transition::SwitchTo("other".to_string()));
    }

    #[test]
    fn test_pattern_step_helpers() {
        assert_eq!(
            PatternStep::capture("identifier", "name"),
            PatternStep::Match {
                token: "identifier".to_string(),
                value: None,
                capture: Some("name".to_string()),
            }
        );
        assert_eq!(
            PatternStep::skip(),
            PatternStep::Skip {
                max_tokens: DEFAULT_SKIP_LIMIT
            }
        );
    }

    #[test]
    fn test_symbol_rule_body_builders() {
        let rule = SymbolRule::new("function", "function", vec![PatternStep::token("keyword")])
            .with_body(BodyStyle::Braces);
        assert!(rule.has_body);
        assert_eq!(rule.body_style, BodyStyle::Braces);

        let rule = SymbolRule::new("module", "module", vec![]).with_end_keyword("end");
        assert_eq!(rule.body_style, BodyStyle::EndKeyword);
        assert_eq!(rule.end_keyword.as_deref(), Some("end"));
    }
}
