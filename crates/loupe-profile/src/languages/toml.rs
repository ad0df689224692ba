//! TOML profile.

use indexmap::IndexMap;

use crate::schema::{
    BlockRule, CharClass, LexRule, LexerConfig, Matcher, NumberOptions, PatternStep, Profile,
    SymbolRule,
};

fn delimited(open: &str, close: &str, escape: Option<char>, multiline: bool) -> Matcher {
    Matcher::Delimited {
        open: open.to_string(),
        close: close.to_string(),
        escape,
        multiline,
        nested: false,
    }
}

/// The TOML profile.
pub fn profile() -> Profile {
    let mut classes = IndexMap::new();
    // Bare keys: letters, digits, underscores, dashes. Dates and other
    // dashed literals fall into the same bucket, which keeps every line
    // tokenizable without a dedicated rule per value grammar.
    classes.insert(
        "bare".to_string(),
        CharClass::union([CharClass::Letter, CharClass::Digit, CharClass::chars("_-")]),
    );

    let mut token_types = IndexMap::new();
    for (ty, category) in [
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("identifier", "identifier"),
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
        LexRule::new(Matcher::line("#"), "comment"),
        LexRule::new(delimited("\"\"\"", "\"\"\"", Some('\\'), true), "string"),
        LexRule::new(delimited("'''", "'''", None, true), "string"),
        LexRule::new(delimited("\"", "\"", Some('\\'), false), "string"),
        LexRule::new(delimited("'", "'", None, false), "string"),
        LexRule::new(
            Matcher::Number(NumberOptions {
                hex: true,
                octal: true,
                binary: true,
                float: true,
                separator: Some('_'),
                suffixes: Vec::new(),
            }),
            "number",
        ),
        LexRule::new(Matcher::keywords(["true", "false"]), "keyword"),
        LexRule::new(
            Matcher::char_seq(CharClass::named("bare"), Some(CharClass::named("bare"))),
            "identifier",
        ),
        LexRule::new(Matcher::exact("="), "operator"),
        LexRule::new(
            Matcher::any_of(["[[", "]]", "[", "]", "{", "}", ",", "."]),
            "punctuation",
        ),
    ];

    let mut states = IndexMap::new();
    states.insert("main".to_string(), rules);

    Profile {
        name: "toml".to_string(),
        extensions: vec![".toml".to_string()],
        lexer: LexerConfig {
            classes,
            token_types,
            states,
            initial: "main".to_string(),
            skip: vec![
                "whitespace".to_string(),
                "newline".to_string(),
                "comment".to_string(),
            ],
            indentation: None,
        },
        blocks: vec![
            BlockRule::new("braces", "{", "}"),
            BlockRule::new("brackets", "[", "]"),
        ],
        symbols: vec![
            SymbolRule::new(
                "arrayTable",
                "table",
                vec![
                    PatternStep::value("punctuation", "[["),
                    PatternStep::capture("identifier", "name"),
                    PatternStep::skip_up_to(10),
                    PatternStep::value("punctuation", "]]"),
                ],
            ),
            SymbolRule::new(
                "table",
                "table",
                vec![
                    PatternStep::value("punctuation", "["),
                    PatternStep::capture("identifier", "name"),
                    PatternStep::skip_up_to(10),
                    PatternStep::value("punctuation", "]"),
                ],
            ),
            SymbolRule::new(
                "property",
                "property",
                vec![
                    PatternStep::capture("identifier", "name"),
                    PatternStep::value("operator", "="),
                ],
            ),
            SymbolRule::new(
                "stringProperty",
                "property",
                vec![
                    PatternStep::capture("string", "name"),
                    PatternStep::value("operator", "="),
                ],
            ),
        ],
        inherits: None,
        embedded: Vec::new(),
    }
}
