//! TypeScript profile: the JavaScript surface plus type-level declarations.

use crate::schema::{BodyStyle, PatternStep, Profile, SymbolRule};

use super::javascript::js_like_profile;

const EXTRA_KEYWORDS: &[&str] = &[
    "interface",
    "type",
    "enum",
    "namespace",
    "implements",
    "declare",
    "abstract",
    "readonly",
    "public",
    "private",
    "protected",
    "satisfies",
    "keyof",
    "infer",
    "is",
    "asserts",
    "any",
    "unknown",
    "never",
];

/// The TypeScript profile.
pub fn profile() -> Profile {
    let mut profile = js_like_profile("typescript", &[".ts", ".tsx"], EXTRA_KEYWORDS);

    profile.symbols.push(
        SymbolRule::new(
            "interface",
            "interface",
            vec![
                PatternStep::value("keyword", "interface"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Braces),
    );
    profile.symbols.push(
        SymbolRule::new(
            "enum",
            "enum",
            vec![
                PatternStep::value("keyword", "enum"),
                PatternStep::capture("identifier", "name"),
            ],
        )
        .with_body(BodyStyle::Braces),
    );
    profile.symbols.push(SymbolRule::new(
        "typeAlias",
        "type",
        vec![
            PatternStep::value("keyword", "type"),
            PatternStep::capture("identifier", "name"),
            PatternStep::value("operator", "="),
        ],
    ));

    profile
}
