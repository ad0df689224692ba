//! Character reader for traversing source text.
//!
//! This module provides the [`Reader`] struct which maintains position
//! state while walking source text character by character. It handles
//! UTF-8 correctly: offsets are byte offsets, columns count characters.

use loupe_util::Position;

/// A cursor for traversing source text character by character.
///
/// The reader tracks a 1-based line, a 0-based character column, and a
/// 0-based byte offset. `\r\n` counts as a single line terminator, and a
/// bare `\r` also ends a line.
///
/// # Example
///
/// ```
/// use loupe_lex::Reader;
///
/// let mut reader = Reader::new("let x = 42;");
/// assert_eq!(reader.peek(0), Some('l'));
/// reader.advance();
/// assert_eq!(reader.peek(0), Some('e'));
/// ```
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte offset into the source.
    offset: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (0-based, in characters).
    column: u32,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the text from the current position to the end.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Returns true if the reader has consumed the entire source.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Returns the character `n` characters ahead of the current position,
    /// or `None` past the end.
    ///
    /// # Example
    ///
    /// ```
    /// use loupe_lex::Reader;
    ///
    /// let reader = Reader::new("ab");
    /// assert_eq!(reader.peek(0), Some('a'));
    /// assert_eq!(reader.peek(1), Some('b'));
    /// assert_eq!(reader.peek(2), None);
    /// ```
    pub fn peek(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Returns the character immediately before the current position, or
    /// `None` at the start of the source.
    pub fn prev_char(&self) -> Option<char> {
        self.source[..self.offset].chars().next_back()
    }

    /// Returns true if the remaining text starts with `literal`.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Advances past one character, updating line and column tracking.
    ///
    /// Returns the consumed character, or `None` at the end of the source.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        let at = self.offset;
        self.offset += c.len_utf8();
        match c {
            '\r' => {
                self.line += 1;
                self.column = 0;
            }
            '\n' => {
                // Part of a \r\n pair? The \r already counted the line.
                if at == 0 || self.source.as_bytes()[at - 1] != b'\r' {
                    self.line += 1;
                }
                self.column = 0;
            }
            _ => self.column += 1,
        }
        Some(c)
    }

    /// Advances past up to `count` characters and returns the consumed
    /// slice.
    ///
    /// # Example
    ///
    /// ```
    /// use loupe_lex::Reader;
    ///
    /// let mut reader = Reader::new("let x");
    /// assert_eq!(reader.advance_by(3), "let");
    /// assert_eq!(reader.position().column, 3);
    /// ```
    pub fn advance_by(&mut self, count: usize) -> &'a str {
        let start = self.offset;
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
        &self.source[start..self.offset]
    }

    /// Saves the current reader state.
    pub fn snapshot(&self) -> ReaderSnapshot {
        ReaderSnapshot {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores a previously saved state.
    pub fn restore(&mut self, snapshot: ReaderSnapshot) {
        self.offset = snapshot.offset;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A saved reader state that can be restored later.
#[derive(Clone, Copy, Debug)]
pub struct ReaderSnapshot {
    offset: usize,
    line: u32,
    column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reader() {
        let reader = Reader::new("let x = 42;");
        assert_eq!(reader.peek(0), Some('l'));
        assert_eq!(reader.position(), Position::new(1, 0, 0));
    }

    #[test]
    fn test_advance_tracks_columns() {
        let mut reader = Reader::new("abc");
        assert_eq!(reader.advance(), Some('a'));
        assert_eq!(reader.position().column, 1);
        assert_eq!(reader.advance(), Some('b'));
        assert_eq!(reader.advance(), Some('c'));
        assert_eq!(reader.advance(), None);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_advance_utf8() {
        let mut reader = Reader::new("αβ");
        assert_eq!(reader.advance(), Some('α'));
        // One character, two bytes.
        assert_eq!(reader.position().column, 1);
        assert_eq!(reader.position().offset, 2);
        assert_eq!(reader.advance(), Some('β'));
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_newline_advances_line() {
        let mut reader = Reader::new("a\nb");
        reader.advance();
        reader.advance();
        assert_eq!(reader.position(), Position::new(2, 0, 2));
        reader.advance();
        assert_eq!(reader.position(), Position::new(2, 1, 3));
    }

    #[test]
    fn test_crlf_counts_one_line() {
        let mut reader = Reader::new("a\r\nb");
        reader.advance(); // a
        reader.advance(); // \r
        assert_eq!(reader.position().line, 2);
        reader.advance(); // \n - same terminator, no extra line
        assert_eq!(reader.position(), Position::new(2, 0, 3));
    }

    #[test]
    fn test_bare_cr_advances_line() {
        let mut reader = Reader::new("a\rb");
        reader.advance();
        reader.advance();
        assert_eq!(reader.position(), Position::new(2, 0, 2));
    }

    #[test]
    fn test_lf_lf_counts_two_lines() {
        let mut reader = Reader::new("\n\n");
        reader.advance();
        reader.advance();
        assert_eq!(reader.position().line, 3);
    }

    #[test]
    fn test_peek_does_not_move() {
        let reader = Reader::new("abc");
        assert_eq!(reader.peek(2), Some('c'));
        assert_eq!(reader.peek(3), None);
        assert_eq!(reader.position().offset, 0);
    }

    #[test]
    fn test_prev_char() {
        let mut reader = Reader::new("ab");
        assert_eq!(reader.prev_char(), None);
        reader.advance();
        assert_eq!(reader.prev_char(), Some('a'));
    }

    #[test]
    fn test_starts_with() {
        let mut reader = Reader::new("function f");
        assert!(reader.starts_with("function"));
        reader.advance_by(9);
        assert!(reader.starts_with("f"));
        assert!(!reader.starts_with("function"));
    }

    #[test]
    fn test_advance_by_returns_slice() {
        let mut reader = Reader::new("let x = 1;");
        assert_eq!(reader.advance_by(3), "let");
        assert_eq!(reader.advance_by(2), " x");
        // Past the end is clamped.
        assert_eq!(reader.advance_by(100), " = 1;");
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut reader = Reader::new("one\ntwo");
        let saved = reader.snapshot();
        reader.advance_by(5);
        assert_eq!(reader.position().line, 2);
        reader.restore(saved);
        assert_eq!(reader.position(), Position::new(1, 0, 0));
        assert_eq!(reader.peek(0), Some('o'));
    }

    #[test]
    fn test_empty_source() {
        let mut reader = Reader::new("");
        assert!(reader.is_at_end());
        assert_eq!(reader.peek(0), None);
        assert_eq!(reader.advance(), None);
        assert_eq!(reader.advance_by(3), "");
    }
}
