//! Markdown profile.
//!
//! Line-oriented rather than word-oriented: headings, quotes, and fenced
//! code blocks are recognized as whole regions, everything else is plain
//! text runs. Newlines stay visible as their own tokens so the
//! markup-block body style can see blank lines.

use indexmap::IndexMap;

use crate::schema::{
    BodyStyle, CharClass, EmbeddedRegion, LexRule, LexerConfig, Matcher, PatternStep, Profile,
    SymbolRule,
};

/// The Markdown profile.
pub fn profile() -> Profile {
    let mut classes = IndexMap::new();
    classes.insert(
        "textChar".to_string(),
        CharClass::negate(CharClass::union([
            CharClass::Newline,
            CharClass::chars("`"),
        ])),
    );

    let mut token_types = IndexMap::new();
    for (ty, category) in [
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("heading", "heading"),
        ("codeFence", "code"),
        ("inlineCode", "code"),
        ("quote", "quote"),
        ("bullet", "punctuation"),
        ("text", "plain"),
    ] {
        token_types.insert(ty.to_string(), category.to_string());
    }

    let rules = vec![
        // The fence must be tried before the single-backtick inline rule.
        LexRule::new(
            Matcher::Delimited {
                open: "```".to_string(),
                close: "```".to_string(),
                escape: None,
                multiline: true,
                nested: false,
            },
            "codeFence",
        ),
        LexRule::new(Matcher::line("#"), "heading"),
        LexRule::new(Matcher::line(">"), "quote"),
        LexRule::new(Matcher::any_of(["- ", "* ", "+ "]), "bullet"),
        LexRule::new(
            Matcher::char_seq(CharClass::Whitespace, Some(CharClass::Whitespace)),
            "whitespace",
        ),
        LexRule::new(Matcher::any_of(["\r\n", "\n", "\r"]), "newline"),
        LexRule::new(Matcher::delimited("`", "`"), "inlineCode"),
        LexRule::new(
            Matcher::char_seq(CharClass::named("textChar"), Some(CharClass::named("textChar"))),
            "text",
        ),
        // A stray unclosed backtick is still text, never an error token.
        LexRule::new(Matcher::exact("`"), "text"),
    ];

    let mut states = IndexMap::new();
    states.insert("main".to_string(), rules);

    Profile {
        name: "markdown".to_string(),
        extensions: vec![".md".to_string(), ".markdown".to_string()],
        lexer: LexerConfig {
            classes,
            token_types,
            states,
            initial: "main".to_string(),
            skip: vec!["whitespace".to_string(), "newline".to_string()],
            indentation: None,
        },
        blocks: Vec::new(),
        symbols: vec![
            SymbolRule::new(
                "heading",
                "heading",
                vec![PatternStep::capture("heading", "name")],
            )
            .with_body(BodyStyle::MarkupBlock),
            SymbolRule::new("codeBlock", "codeBlock", vec![PatternStep::token("codeFence")]),
        ],
        inherits: None,
        embedded: vec![EmbeddedRegion {
            token: "codeFence".to_string(),
            language: "auto".to_string(),
        }],
    }
}
