//! Built-in language profiles.
//!
//! Each submodule exports a single `profile()` constructor returning plain
//! data. Nothing in here executes at lex time - the engine interprets the
//! returned structures.

pub mod javascript;
pub mod json;
pub mod markdown;
pub mod python;
pub mod toml;
pub mod typescript;

use crate::registry::Registry;
use crate::schema::Profile;

/// All built-in profiles, in registration order.
pub fn all() -> Vec<Profile> {
    vec![
        javascript::profile(),
        typescript::profile(),
        python::profile(),
        markdown::profile(),
        toml::profile(),
        json::profile(),
    ]
}

/// Registers every built-in profile into `registry`.
pub fn install(registry: &Registry) {
    for profile in all() {
        registry.register(profile);
    }
}
