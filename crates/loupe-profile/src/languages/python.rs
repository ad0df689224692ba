//! Python profile.

use indexmap::IndexMap;

use crate::schema::{
    BlockRule, BodyStyle, CharClass, IndentationConfig, LexRule, LexerConfig, Matcher,
    NumberOptions, PatternStep, Profile, SymbolRule,
};

const KEYWORDS: &[&str] = &[
    "def", "class", "return", "if", "elif", "else", "for", "while", "break", "continue", "pass",
    "import", "from", "as", "with", "lambda", "try", "except", "finally", "raise", "yield",
    "global", "nonlocal", "del", "not", "and", "or", "in", "is", "None", "True", "False", "async",
    "await", "assert", "match", "case",
];

const OPERATORS: &[&str] = &[
    "**=", "//=", "<<=", ">>=", "->", ":=", "**", "//", "==", "!=", "<=", ">=", "<<", ">>", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@", "+", "-", "*", "/", "%", "<", ">", "=", "&",
    "|", "^", "~",
];

const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ":", ",", ".", ";"];

fn delimited(open: &str, close: &str, escape: Option<char>, multiline: bool) -> Matcher {
    Matcher::Delimited {
        open: open.to_string(),
        close: close.to_string(),
        escape,
        multiline,
        nested: false,
    }
}

/// The Python profile.
pub fn profile() -> Profile {
    let mut classes = IndexMap::new();
    classes.insert(
        "identStart".to_string(),
        CharClass::union([CharClass::Letter, CharClass::chars("_")]),
    );
    classes.insert(
        "identPart".to_string(),
        CharClass::union([CharClass::Letter, CharClass::Digit, CharClass::chars("_")]),
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
        LexRule::new(delimited("'''", "'''", Some('\\'), true), "string"),
        LexRule::new(delimited("\"", "\"", Some('\\'), false), "string"),
        LexRule::new(delimited("'", "'", Some('\\'), false), "string"),
        LexRule::new(
            Matcher::Number(NumberOptions {
                hex: true,
                octal: true,
                binary: true,
                float: true,
                separator: Some('_'),
                suffixes: vec!["j".to_string(), "J".to_string()],
            }),
            "number",
        ),
        LexRule::new(Matcher::keywords(KEYWORDS.iter().copied()), "keyword"),
        LexRule::new(
            Matcher::char_seq(CharClass::named("identStart"), Some(CharClass::named("identPart"))),
            "identifier",
        ),
        LexRule::new(Matcher::any_of(OPERATORS.iter().copied()), "operator"),
        LexRule::new(Matcher::any_of(PUNCTUATION.iter().copied()), "punctuation"),
    ];

    let mut states = IndexMap::new();
    states.insert("main".to_string(), rules);

    Profile {
        name: "python".to_string(),
        extensions: vec![".py".to_string(), ".pyw".to_string()],
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
            indentation: Some(IndentationConfig { tab_width: 4 }),
        },
        blocks: vec![
            BlockRule::new("parens", "(", ")"),
            BlockRule::new("brackets", "[", "]"),
            BlockRule::new("braces", "{", "}"),
        ],
        symbols: vec![
            SymbolRule::new(
                "class",
                "class",
                vec![
                    PatternStep::value("keyword", "class"),
                    PatternStep::capture("identifier", "name"),
                ],
            )
            .with_body(BodyStyle::Indentation)
            .allow_nested(),
            SymbolRule::new(
                "function",
                "function",
                vec![
                    PatternStep::value("keyword", "def"),
                    PatternStep::capture("identifier", "name"),
                ],
            )
            .with_body(BodyStyle::Indentation)
            .allow_nested(),
        ],
        inherits: None,
        embedded: Vec::new(),
    }
}
