//! JavaScript profile.

use indexmap::IndexMap;

use crate::schema::{
    BlockRule, BodyStyle, CharClass, LexRule, LexerConfig, Matcher, NumberOptions, PatternStep,
    Profile, SymbolRule,
};

const KEYWORDS: &[&str] = &[
    "function",
    "return",
    "if",
    "else",
    "for",
    "while",
    "do",
    "switch",
    "case",
    "default",
    "break",
    "continue",
    "new",
    "delete",
    "typeof",
    "instanceof",
    "void",
    "in",
    "of",
    "this",
    "super",
    "class",
    "extends",
    "const",
    "let",
    "var",
    "import",
    "export",
    "from",
    "as",
    "async",
    "await",
    "yield",
    "try",
    "catch",
    "finally",
    "throw",
    "static",
    "get",
    "set",
    "true",
    "false",
    "null",
    "undefined",
];

const OPERATORS: &[&str] = &[
    "===", "!==", ">>>", "**=", "...", "=>", "==", "!=", "<=", ">=", "&&", "||", "??", "?.", "**",
    "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "=", "+", "-", "*",
    "/", "%", "!", "<", ">", "&", "|", "^", "~", "?",
];

const PUNCTUATION: &[&str] = &["{", "}", "(", ")", "[", "]", ";", ",", ".", ":"];

/// Shared constructor for the C-brace scripting surface; typescript builds
/// on it with extra keywords and symbol rules.
pub(crate) fn js_like_profile(
    name: &str,
    extensions: &[&str],
    extra_keywords: &[&str],
) -> Profile {
    let mut classes = IndexMap::new();
    classes.insert(
        "identStart".to_string(),
        CharClass::union([CharClass::Letter, CharClass::chars("_$")]),
    );
    classes.insert(
        "identPart".to_string(),
        CharClass::union([CharClass::Letter, CharClass::Digit, CharClass::chars("_$")]),
    );

    let mut token_types = IndexMap::new();
    for (ty, category) in [
        ("whitespace", "whitespace"),
        ("newline", "whitespace"),
        ("comment", "comment"),
        ("string", "string"),
        ("template", "string"),
        ("number", "number"),
        ("keyword", "keyword"),
        ("identifier", "identifier"),
        ("operator", "operator"),
        ("punctuation", "punctuation"),
    ] {
        token_types.insert(ty.to_string(), category.to_string());
    }

    let mut keywords: Vec<&str> = KEYWORDS.to_vec();
    keywords.extend_from_slice(extra_keywords);

    let rules = vec![
        LexRule::new(
            Matcher::char_seq(CharClass::Whitespace, Some(CharClass::Whitespace)),
            "whitespace",
        ),
        LexRule::new(Matcher::any_of(["\r\n", "\n", "\r"]), "newline"),
        LexRule::new(Matcher::line("//"), "comment"),
        LexRule::new(
            Matcher::Delimited {
                open: "/*".to_string(),
                close: "*/".to_string(),
                escape: None,
                multiline: true,
                nested: false,
            },
            "comment",
        ),
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
            Matcher::Delimited {
                open: "'".to_string(),
                close: "'".to_string(),
                escape: Some('\\'),
                multiline: false,
                nested: false,
            },
            "string",
        ),
        LexRule::new(
            Matcher::Delimited {
                open: "`".to_string(),
                close: "`".to_string(),
                escape: Some('\\'),
                multiline: true,
                nested: false,
            },
            "template",
        ),
        LexRule::new(
            Matcher::Number(NumberOptions {
                hex: true,
                octal: true,
                binary: true,
                float: true,
                separator: Some('_'),
                suffixes: vec!["n".to_string()],
            }),
            "number",
        ),
        LexRule::new(Matcher::keywords(keywords), "keyword"),
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
        name: name.to_string(),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
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
            BlockRule::new("parens", "(", ")"),
            BlockRule::new("brackets", "[", "]"),
        ],
        symbols: vec![
            SymbolRule::new(
                "function",
                "function",
                vec![
                    PatternStep::value("keyword", "function"),
                    PatternStep::optional(PatternStep::value("operator", "*")),
                    PatternStep::capture("identifier", "name"),
                ],
            )
            .with_body(BodyStyle::Braces),
            SymbolRule::new(
                "class",
                "class",
                vec![
                    PatternStep::value("keyword", "class"),
                    PatternStep::capture("identifier", "name"),
                ],
            )
            .with_body(BodyStyle::Braces),
            // Heuristic: a binding whose initializer turns into an arrow
            // shortly after the `=`. The small skip bound keeps unrelated
            // statements from being pulled in.
            SymbolRule::new(
                "arrowFunction",
                "function",
                vec![
                    PatternStep::any_of([
                        PatternStep::value("keyword", "const"),
                        PatternStep::value("keyword", "let"),
                        PatternStep::value("keyword", "var"),
                    ]),
                    PatternStep::capture("identifier", "name"),
                    PatternStep::value("operator", "="),
                    PatternStep::skip_up_to(6),
                    PatternStep::value("operator", "=>"),
                ],
            )
            .with_body(BodyStyle::Braces),
        ],
        inherits: None,
        embedded: Vec::new(),
    }
}

/// The JavaScript profile.
pub fn profile() -> Profile {
    js_like_profile("javascript", &[".js", ".mjs", ".cjs", ".jsx"], &[])
}
