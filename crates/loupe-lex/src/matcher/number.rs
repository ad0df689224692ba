//! Numeric-literal scanning.
//!
//! Handles prefixed bases (`0x`/`0o`/`0b`, each individually opt-in),
//! decimal integers and floats, digit separators, exponents, and literal
//! suffixes. Like every matcher, this only measures: it reports the
//! character count of the literal at the start of the input, 0 when there
//! is none.

use loupe_profile::NumberOptions;

/// A compiled numeric-literal matcher.
#[derive(Clone, Debug)]
pub struct CompiledNumber {
    hex: bool,
    octal: bool,
    binary: bool,
    float: bool,
    separator: Option<char>,
    /// Suffixes sorted longest-first.
    suffixes: Vec<String>,
}

impl CompiledNumber {
    /// Compiles the options, ordering suffixes longest-first.
    pub fn new(options: &NumberOptions) -> Self {
        let mut suffixes = options.suffixes.clone();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            hex: options.hex,
            octal: options.octal,
            binary: options.binary,
            float: options.float,
            separator: options.separator,
            suffixes,
        }
    }

    /// Measures the numeric literal at the start of `rest`, in characters.
    pub fn scan(&self, rest: &str) -> usize {
        let bytes = rest.as_bytes();

        // Prefixed bases. A present prefix with a missing digit run is a
        // failed match, not a `0` literal.
        let bases: [(bool, &[u8; 2], fn(u8) -> bool); 3] = [
            (self.hex, b"xX", |b: u8| b.is_ascii_hexdigit()),
            (self.octal, b"oO", |b: u8| (b'0'..=b'7').contains(&b)),
            (self.binary, b"bB", |b: u8| b == b'0' || b == b'1'),
        ];
        for (enabled, tags, is_digit) in bases {
            if !enabled || bytes.first() != Some(&b'0') {
                continue;
            }
            let Some(&tag) = bytes.get(1) else { continue };
            if tag != tags[0] && tag != tags[1] {
                continue;
            }
            let mut i = 2;
            if self.digit_run(rest, &mut i, is_digit) == 0 {
                return 0;
            }
            self.consume_suffix(rest, &mut i);
            return rest[..i].chars().count();
        }

        // Decimal.
        let mut i = 0;
        let int_digits = self.digit_run(rest, &mut i, |b| b.is_ascii_digit());
        if int_digits == 0 {
            // A leading `.digit` is only a number in float mode.
            let dotted = self.float
                && bytes.first() == Some(&b'.')
                && bytes.get(1).is_some_and(u8::is_ascii_digit);
            if !dotted {
                return 0;
            }
        }

        // Fractional part: the dot is only consumed when a digit follows.
        if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
            self.digit_run(rest, &mut i, |b| b.is_ascii_digit());
        }

        // Exponent: committed only when at least one digit is present.
        if matches!(bytes.get(i).copied(), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j).copied(), Some(b'+' | b'-')) {
                j += 1;
            }
            let mut k = j;
            while bytes.get(k).is_some_and(u8::is_ascii_digit) {
                k += 1;
            }
            if k > j {
                i = k;
            }
        }

        self.consume_suffix(rest, &mut i);
        rest[..i].chars().count()
    }

    /// Consumes a run of digits, allowing the separator between digits
    /// only. Returns the number of digits consumed.
    fn digit_run(&self, rest: &str, i: &mut usize, is_digit: fn(u8) -> bool) -> usize {
        let bytes = rest.as_bytes();
        let mut digits = 0;
        loop {
            if bytes.get(*i).copied().is_some_and(is_digit) {
                digits += 1;
                *i += 1;
                continue;
            }
            if let Some(sep) = self.separator {
                if digits > 0 && rest[*i..].starts_with(sep) {
                    let after = *i + sep.len_utf8();
                    if bytes.get(after).copied().is_some_and(is_digit) {
                        *i = after;
                        continue;
                    }
                }
            }
            return digits;
        }
    }

    /// Consumes the longest configured suffix, if one is present.
    fn consume_suffix(&self, rest: &str, i: &mut usize) {
        for suffix in &self.suffixes {
            if rest[*i..].starts_with(suffix.as_str()) {
                *i += suffix.len();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(configure: impl FnOnce(&mut NumberOptions)) -> CompiledNumber {
        let mut options = NumberOptions::default();
        configure(&mut options);
        CompiledNumber::new(&options)
    }

    fn full() -> CompiledNumber {
        scanner(|o| {
            o.hex = true;
            o.octal = true;
            o.binary = true;
            o.float = true;
            o.separator = Some('_');
        })
    }

    #[test]
    fn test_decimal_integers() {
        let n = full();
        assert_eq!(n.scan("42;"), 2);
        assert_eq!(n.scan("0"), 1);
        assert_eq!(n.scan("x42"), 0);
        assert_eq!(n.scan(""), 0);
    }

    #[test]
    fn test_prefixed_bases() {
        let n = full();
        assert_eq!(n.scan("0xFF "), 4);
        assert_eq!(n.scan("0XAB_CD"), 7);
        assert_eq!(n.scan("0o777"), 5);
        assert_eq!(n.scan("0b1010"), 6);
        // Prefix without digits fails outright.
        assert_eq!(n.scan("0x "), 0);
        assert_eq!(n.scan("0b2"), 0);
    }

    #[test]
    fn test_disabled_base_falls_back_to_decimal() {
        let n = scanner(|o| o.float = true);
        // Only the leading zero is a number; `x` is left for other rules.
        assert_eq!(n.scan("0xFF"), 1);
    }

    #[test]
    fn test_floats() {
        let n = full();
        assert_eq!(n.scan("3.14"), 4);
        // The dot is not consumed without a following digit.
        assert_eq!(n.scan("1."), 1);
        assert_eq!(n.scan("1.e5"), 1);
        // Leading-dot form requires the float flag.
        assert_eq!(n.scan(".5"), 2);
        let no_float = scanner(|o| o.hex = true);
        assert_eq!(no_float.scan(".5"), 0);
    }

    #[test]
    fn test_exponents() {
        let n = full();
        assert_eq!(n.scan("1e10"), 4);
        assert_eq!(n.scan("2.5e-3"), 6);
        assert_eq!(n.scan("1E+2"), 4);
        // An exponent without digits is not committed.
        assert_eq!(n.scan("1e"), 1);
        assert_eq!(n.scan("1e+"), 1);
        assert_eq!(n.scan("1e+x"), 1);
    }

    #[test]
    fn test_separators_between_digits_only() {
        let n = full();
        assert_eq!(n.scan("1_000_000"), 9);
        // Trailing separator is not part of the literal.
        assert_eq!(n.scan("1_"), 1);
        // Separator cannot lead.
        assert_eq!(n.scan("_1"), 0);
        assert_eq!(n.scan("1__2"), 1);
    }

    #[test]
    fn test_suffixes_longest_first() {
        let n = CompiledNumber::new(&NumberOptions {
            float: true,
            suffixes: vec!["u".to_string(), "u64".to_string()],
            ..NumberOptions::default()
        });
        assert_eq!(n.scan("10u64"), 5);
        assert_eq!(n.scan("10u"), 3);
        assert_eq!(n.scan("10"), 2);
    }
}
