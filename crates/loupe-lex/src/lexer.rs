//! The stateful lexer.
//!
//! [`CompiledLexer::compile`] turns a profile's lexer configuration into
//! compiled rule lists, once; [`CompiledLexer::tokenize`] then drives a
//! [`Reader`] through the current state's rules. The first rule whose scan
//! reports a non-zero length wins; no rule matching means one character is
//! consumed as an `error` token, so the loop always makes progress.

use loupe_profile::{
    Profile, Transition, ERROR_CATEGORY, ERROR_TOKEN_TYPE, PLAIN_CATEGORY,
};
use loupe_util::Range;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::LexError;
use crate::matcher::CompiledMatcher;
use crate::reader::Reader;
use crate::state::StateStack;
use crate::token::Token;

/// One compiled lexer rule.
#[derive(Clone, Debug)]
struct CompiledRule {
    matcher: CompiledMatcher,
    token: String,
    transition: Transition,
}

/// A profile's lexer, compiled and ready to tokenize any number of
/// sources.
///
/// Immutable after construction and safe to share across threads.
///
/// # Example
///
/// ```
/// use loupe_lex::CompiledLexer;
/// use loupe_profile::languages::javascript;
///
/// let lexer = CompiledLexer::compile(&javascript::profile()).unwrap();
/// let tokens = lexer.tokenize("let x = 1;").unwrap();
/// assert_eq!(tokens[0].value, "let");
/// assert_eq!(tokens[0].category, "keyword");
/// ```
#[derive(Debug)]
pub struct CompiledLexer {
    states: FxHashMap<String, Vec<CompiledRule>>,
    initial: String,
    categories: FxHashMap<String, String>,
}

impl CompiledLexer {
    /// Compiles a profile's lexer configuration.
    ///
    /// Fails on malformed matchers, unresolved character classes, or a
    /// missing initial state - all fatal configuration errors.
    pub fn compile(profile: &Profile) -> Result<Self, LexError> {
        let config = &profile.lexer;
        let mut states = FxHashMap::default();
        for (name, rules) in &config.states {
            let compiled = rules
                .iter()
                .map(|rule| {
                    Ok(CompiledRule {
                        matcher: CompiledMatcher::compile(&rule.matcher, &config.classes)?,
                        token: rule.token.clone(),
                        transition: rule.transition.clone(),
                    })
                })
                .collect::<Result<Vec<_>, LexError>>()?;
            states.insert(name.clone(), compiled);
        }
        if !states.contains_key(&config.initial) {
            return Err(LexError::UnknownState(config.initial.clone()));
        }
        let categories = config
            .token_types
            .iter()
            .map(|(ty, category)| (ty.clone(), category.clone()))
            .collect();
        Ok(Self {
            states,
            initial: config.initial.clone(),
            categories,
        })
    }

    /// Category for a token type, falling back to `plain`.
    fn category_for(&self, token_type: &str) -> &str {
        self.categories
            .get(token_type)
            .map(String::as_str)
            .unwrap_or(PLAIN_CATEGORY)
    }

    /// Tokenizes a source text.
    ///
    /// The produced stream covers the source without gaps or overlap.
    /// Returns an error only for profile-configuration faults (a
    /// transition into an unknown state); unrecognized input becomes
    /// `error` tokens instead.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError> {
        let mut reader = Reader::new(source);
        let mut states = StateStack::new(&self.initial);
        let mut tokens = Vec::new();

        while !reader.is_at_end() {
            let rules = self
                .states
                .get(states.current())
                .ok_or_else(|| LexError::UnknownState(states.current().to_string()))?;

            let start = reader.position();
            let mut transition = None;
            for rule in rules {
                let n = rule.matcher.scan(&mut reader);
                if n == 0 {
                    continue;
                }
                let value = reader.advance_by(n);
                tokens.push(Token {
                    kind: rule.token.clone(),
                    value: value.to_string(),
                    category: self.category_for(&rule.token).to_string(),
                    range: Range::new(start, reader.position()),
                });
                transition = Some(&rule.transition);
                break;
            }

            match transition {
                Some(transition) => states.apply(transition),
                None => {
                    // No rule matched: consume one character so the loop
                    // always advances.
                    let value = reader.advance_by(1);
                    trace!(offset = start.offset, "no rule matched, emitting error token");
                    tokens.push(Token {
                        kind: ERROR_TOKEN_TYPE.to_string(),
                        value: value.to_string(),
                        category: ERROR_CATEGORY.to_string(),
                        range: Range::new(start, reader.position()),
                    });
                }
            }
        }
        Ok(tokens)
    }
}
