//! loupe-drv - The engine facade.
//!
//! Ties the pipeline together behind two calls:
//!
//! ```text
//! source text ─▶ [loupe-lex] ─▶ tokens ─▶ [loupe-par] ─▶ symbols
//!                    ▲
//!                    │ compiled once per profile, cached
//!               [loupe-profile] registry
//! ```
//!
//! [`Engine::tokenize`] and [`Engine::extract_symbols`] resolve a language
//! identifier (profile name or file extension) through the registry, fetch
//! or build the profile's compiled lexer, and run the requested phase.
//! Compiled lexers are cached per profile, keyed by `Arc` pointer identity
//! - profiles are immutable once registered, so identity is the correct
//! cache key and eviction is unnecessary.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use loupe_lex::{CompiledLexer, LexError, Token};
use loupe_par::CodeSymbol;
use loupe_profile::{languages, Profile, Registry};

/// Errors surfaced by the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The identifier resolved to no registered profile.
    #[error("unknown language '{name}'; registered languages: {known}")]
    UnknownLanguage {
        /// The identifier as given.
        name: String,
        /// Comma-separated registered profile names.
        known: String,
    },

    /// A fatal profile-configuration error from the lexer.
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// The top-level analysis engine.
///
/// Owns a profile [`Registry`] (pre-loaded with the built-in languages by
/// [`Engine::new`]) and a cache of compiled lexers. The engine is cheap to
/// share behind an `Arc`; all operations take `&self`.
///
/// # Example
///
/// ```
/// use loupe_drv::Engine;
///
/// let engine = Engine::new();
/// let tokens = engine.tokenize("let x = 1;", "javascript").unwrap();
/// assert_eq!(tokens[0].value, "let");
///
/// let symbols = engine
///     .extract_symbols("function greet() { return 1; }", ".js")
///     .unwrap();
/// assert_eq!(symbols[0].name, "greet");
/// ```
pub struct Engine {
    registry: Registry,
    lexers: Mutex<FxHashMap<usize, Arc<CompiledLexer>>>,
}

impl Engine {
    /// Creates an engine with the built-in languages registered.
    pub fn new() -> Self {
        let registry = Registry::new();
        languages::install(&registry);
        Self::with_registry(registry)
    }

    /// Creates an engine over an existing registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            lexers: Mutex::new(FxHashMap::default()),
        }
    }

    /// The engine's registry, for registering additional profiles.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tokenizes `source` under the profile identified by `language` (a
    /// profile name, or an extension with its dot).
    pub fn tokenize(&self, source: &str, language: &str) -> Result<Vec<Token>, EngineError> {
        let profile = self.resolve(language)?;
        let lexer = self.lexer_for(&profile)?;
        Ok(lexer.tokenize(source)?)
    }

    /// Extracts structural symbols from `source` under the profile
    /// identified by `language`.
    pub fn extract_symbols(
        &self,
        source: &str,
        language: &str,
    ) -> Result<Vec<CodeSymbol>, EngineError> {
        let profile = self.resolve(language)?;
        let lexer = self.lexer_for(&profile)?;
        let tokens = lexer.tokenize(source)?;
        Ok(loupe_par::extract_symbols(&tokens, &profile))
    }

    fn resolve(&self, language: &str) -> Result<Arc<Profile>, EngineError> {
        self.registry
            .lookup(language)
            .ok_or_else(|| EngineError::UnknownLanguage {
                name: language.to_string(),
                known: self.registry.list_names().join(", "),
            })
    }

    /// Fetches the cached lexer for a profile, compiling on first use.
    fn lexer_for(&self, profile: &Arc<Profile>) -> Result<Arc<CompiledLexer>, LexError> {
        let key = Arc::as_ptr(profile) as usize;
        if let Some(lexer) = self.lexers.lock().get(&key) {
            return Ok(Arc::clone(lexer));
        }
        // Compile outside the lock; a racing second compile of the same
        // profile is harmless, the map just keeps one of them.
        debug!(profile = %profile.name, "compiling lexer");
        let lexer = Arc::new(CompiledLexer::compile(profile)?);
        self.lexers.lock().insert(key, Arc::clone(&lexer));
        Ok(lexer)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_names_identifier_and_listing() {
        let engine = Engine::new();
        let err = engine.tokenize("x", "cobol").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cobol"));
        assert!(message.contains("javascript"));
    }

    #[test]
    fn test_lookup_by_extension_case_insensitive() {
        let engine = Engine::new();
        assert!(engine.tokenize("x = 1\n", ".PY").is_ok());
        assert!(engine.tokenize("x = 1\n", "python").is_ok());
    }

    #[test]
    fn test_lexer_cache_reuses_compilation() {
        let engine = Engine::new();
        engine.tokenize("1", "json").unwrap();
        engine.tokenize("2", "json").unwrap();
        // One profile, one cached lexer - lookups by name and extension
        // resolve to the same Arc.
        assert_eq!(engine.lexers.lock().len(), 1);
        engine.tokenize("3", ".json").unwrap();
        assert_eq!(engine.lexers.lock().len(), 1);
    }

    #[test]
    fn test_reregistration_compiles_fresh_lexer() {
        let engine = Engine::new();
        engine.tokenize("1", "json").unwrap();
        let replacement = loupe_profile::languages::json::profile();
        engine.registry().register(replacement);
        engine.tokenize("2", "json").unwrap();
        // The replaced profile has a new identity, so a second entry.
        assert_eq!(engine.lexers.lock().len(), 2);
    }

    #[test]
    fn test_empty_source_yields_empty_results() {
        let engine = Engine::new();
        for language in ["javascript", "python", "markdown", "toml", "json"] {
            assert!(engine.tokenize("", language).unwrap().is_empty());
            assert!(engine.extract_symbols("", language).unwrap().is_empty());
        }
    }
}
