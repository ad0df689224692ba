//! Character-class compilation.
//!
//! Turns the declarative [`CharClass`] algebra into a [`CompiledClass`]
//! whose [`matches`](CompiledClass::matches) is a plain single-character
//! predicate. Named references are resolved against the profile's class
//! table here, once, so an unknown or circular reference surfaces as a
//! configuration error before any source text is scanned.

use indexmap::IndexMap;
use loupe_profile::CharClass;

use crate::error::LexError;

/// The letter class: ASCII letters plus the Latin-1 Supplement and Latin
/// Extended ranges.
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{24F}').contains(&c)
}

/// A character class compiled to predicate form.
#[derive(Clone, Debug)]
pub enum CompiledClass {
    /// See [`CharClass::Letter`].
    Letter,
    /// ASCII `A-Z`.
    Upper,
    /// ASCII `a-z`.
    Lower,
    /// ASCII `0-9`.
    Digit,
    /// ASCII hex digits.
    HexDigit,
    /// Letter or digit.
    Alphanumeric,
    /// Space or tab.
    Whitespace,
    /// `\n` or `\r`.
    Newline,
    /// Any character.
    Any,
    /// An explicit set.
    Chars(Vec<char>),
    /// An inclusive range.
    CharRange(char, char),
    /// Any member matches.
    Union(Vec<CompiledClass>),
    /// The inner class does not match.
    Negate(Box<CompiledClass>),
}

impl CompiledClass {
    /// Compiles a class expression, resolving named references through
    /// `table`.
    pub fn compile(
        class: &CharClass,
        table: &IndexMap<String, CharClass>,
    ) -> Result<Self, LexError> {
        let mut resolving = Vec::new();
        Self::compile_inner(class, table, &mut resolving)
    }

    fn compile_inner(
        class: &CharClass,
        table: &IndexMap<String, CharClass>,
        resolving: &mut Vec<String>,
    ) -> Result<Self, LexError> {
        let compiled = match class {
            CharClass::Letter => CompiledClass::Letter,
            CharClass::Upper => CompiledClass::Upper,
            CharClass::Lower => CompiledClass::Lower,
            CharClass::Digit => CompiledClass::Digit,
            CharClass::HexDigit => CompiledClass::HexDigit,
            CharClass::Alphanumeric => CompiledClass::Alphanumeric,
            CharClass::Whitespace => CompiledClass::Whitespace,
            CharClass::Newline => CompiledClass::Newline,
            CharClass::Any => CompiledClass::Any,
            CharClass::Chars(set) => CompiledClass::Chars(set.chars().collect()),
            CharClass::CharRange(lo, hi) => CompiledClass::CharRange(*lo, *hi),
            CharClass::Union(members) => {
                let members = members
                    .iter()
                    .map(|m| Self::compile_inner(m, table, resolving))
                    .collect::<Result<Vec<_>, _>>()?;
                CompiledClass::Union(members)
            }
            CharClass::Negate(inner) => {
                CompiledClass::Negate(Box::new(Self::compile_inner(inner, table, resolving)?))
            }
            CharClass::Named(name) => {
                if resolving.iter().any(|seen| seen == name) {
                    return Err(LexError::CircularClass(name.clone()));
                }
                let target = table
                    .get(name)
                    .ok_or_else(|| LexError::UnresolvedClass(name.clone()))?;
                resolving.push(name.clone());
                let compiled = Self::compile_inner(target, table, resolving)?;
                resolving.pop();
                compiled
            }
        };
        Ok(compiled)
    }

    /// Tests one character against the class.
    pub fn matches(&self, c: char) -> bool {
        match self {
            CompiledClass::Letter => is_letter(c),
            CompiledClass::Upper => c.is_ascii_uppercase(),
            CompiledClass::Lower => c.is_ascii_lowercase(),
            CompiledClass::Digit => c.is_ascii_digit(),
            CompiledClass::HexDigit => c.is_ascii_hexdigit(),
            CompiledClass::Alphanumeric => is_letter(c) || c.is_ascii_digit(),
            CompiledClass::Whitespace => c == ' ' || c == '\t',
            CompiledClass::Newline => c == '\n' || c == '\r',
            CompiledClass::Any => true,
            CompiledClass::Chars(set) => set.contains(&c),
            CompiledClass::CharRange(lo, hi) => (*lo..=*hi).contains(&c),
            CompiledClass::Union(members) => members.iter().any(|m| m.matches(c)),
            CompiledClass::Negate(inner) => !inner.matches(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(class: CharClass) -> CompiledClass {
        CompiledClass::compile(&class, &IndexMap::new()).unwrap()
    }

    #[test]
    fn test_letter_covers_latin_extended() {
        let letter = compile(CharClass::Letter);
        assert!(letter.matches('a'));
        assert!(letter.matches('Z'));
        assert!(letter.matches('é'));
        assert!(letter.matches('ŏ'));
        assert!(!letter.matches('1'));
        assert!(!letter.matches('_'));
    }

    #[test]
    fn test_whitespace_excludes_newline() {
        let ws = compile(CharClass::Whitespace);
        assert!(ws.matches(' '));
        assert!(ws.matches('\t'));
        assert!(!ws.matches('\n'));
        assert!(!ws.matches('\r'));

        let nl = compile(CharClass::Newline);
        assert!(nl.matches('\n'));
        assert!(nl.matches('\r'));
        assert!(!nl.matches(' '));
    }

    #[test]
    fn test_chars_and_range() {
        let set = compile(CharClass::chars("_$"));
        assert!(set.matches('_'));
        assert!(set.matches('$'));
        assert!(!set.matches('a'));

        let range = compile(CharClass::CharRange('a', 'f'));
        assert!(range.matches('c'));
        assert!(!range.matches('g'));
    }

    #[test]
    fn test_union_and_negate() {
        let ident = compile(CharClass::union([
            CharClass::Letter,
            CharClass::Digit,
            CharClass::chars("_"),
        ]));
        assert!(ident.matches('x'));
        assert!(ident.matches('7'));
        assert!(ident.matches('_'));
        assert!(!ident.matches('-'));

        let not_newline = compile(CharClass::negate(CharClass::Newline));
        assert!(not_newline.matches('a'));
        assert!(!not_newline.matches('\n'));
    }

    #[test]
    fn test_named_resolution() {
        let mut table = IndexMap::new();
        table.insert(
            "identStart".to_string(),
            CharClass::union([CharClass::Letter, CharClass::chars("_")]),
        );
        let compiled = CompiledClass::compile(&CharClass::named("identStart"), &table).unwrap();
        assert!(compiled.matches('_'));
        assert!(!compiled.matches('3'));
    }

    #[test]
    fn test_unknown_named_class_is_fatal() {
        let err = CompiledClass::compile(&CharClass::named("missing"), &IndexMap::new())
            .unwrap_err();
        assert_eq!(err, LexError::UnresolvedClass("missing".to_string()));
    }

    #[test]
    fn test_circular_named_class_is_fatal() {
        let mut table = IndexMap::new();
        table.insert("a".to_string(), CharClass::named("b"));
        table.insert("b".to_string(), CharClass::named("a"));
        let err = CompiledClass::compile(&CharClass::named("a"), &table).unwrap_err();
        assert!(matches!(err, LexError::CircularClass(_)));
    }
}
