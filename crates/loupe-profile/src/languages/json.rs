//! JSON profile.

use indexmap::IndexMap;

use crate::schema::{
    BlockRule, CharClass, LexRule, LexerConfig, Matcher, NumberOptions, PatternStep, Profile,
    SymbolRule,
};

/// The JSON profile.
pub fn profile() -> Profile {
    let mut token_types = IndexMap::new();
    for (ty, category) in [
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("string", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("operator", "operator"),
        ("punctuation", "punctuation"),
    ] {
        token_types.insert(ty.to_string(), category.to_string());
    }

    let rules = vec![
        LexRule::new(
            Matcher::char_seq(CharClass::Whitespace, Some(CharClass::Whitespace)),
            "whitespace",
        ),
        LexRule::new(Matcher::any_of(["\r\n", "\n", "\r"]), "newline"),
        LexRule::new(
            Matcher::Delimited {
                open: "\"".to_string(),
                close: "\"".to_string(),
                escape: Some('\\'),
                multiline: false,
                nested: false,
            },
            "string",
        ),
        LexRule::new(
            Matcher::Number(NumberOptions {
                float: true,
                ..NumberOptions::default()
            }),
            "number",
        ),
        LexRule::new(Matcher::keywords(["true", "false", "null"]), "keyword"),
        LexRule::new(Matcher::any_of(["-", "+"]), "operator"),
        LexRule::new(Matcher::any_of(["{", "}", "[", "]", ":", ","]), "punctuation"),
    ];

    let mut states = IndexMap::new();
    states.insert("main".to_string(), rules);

    Profile {
        name: "json".to_string(),
        extensions: vec![".json".to_string()],
        lexer: LexerConfig {
            classes: IndexMap::new(),
            token_types,
            states,
            initial: "main".to_string(),
            skip: vec!["whitespace".to_string(), "newline".to_string()],
            indentation: None,
        },
        blocks: vec![
            BlockRule::new("braces", "{", "}"),
            BlockRule::new("brackets", "[", "]"),
        ],
        symbols: vec![SymbolRule::new(
            "property",
            "property",
            vec![
                PatternStep::capture("string", "name"),
                PatternStep::value("punctuation", ":"),
            ],
        )],
        inherits: None,
        embedded: Vec::new(),
    }
}
