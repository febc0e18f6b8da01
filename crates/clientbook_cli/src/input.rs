//! Whitespace-delimited token input for the menu loop.
//!
//! # Responsibility
//! - Buffer input lines and hand out one token at a time.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Token reader over any buffered source.
pub struct TokenReader<R> {
    source: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next whitespace-delimited token, or `None` at end of
    /// input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.source.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenReader;
    use std::io::Cursor;

    #[test]
    fn tokens_split_on_any_whitespace_across_lines() {
        let mut reader = TokenReader::new(Cursor::new("one two\n\n  three\n"));
        assert_eq!(reader.next_token().unwrap().as_deref(), Some("one"));
        assert_eq!(reader.next_token().unwrap().as_deref(), Some("two"));
        assert_eq!(reader.next_token().unwrap().as_deref(), Some("three"));
        assert_eq!(reader.next_token().unwrap(), None);
    }

    #[test]
    fn end_of_input_returns_none() {
        let mut reader = TokenReader::new(Cursor::new(""));
        assert_eq!(reader.next_token().unwrap(), None);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut reader = TokenReader::new(Cursor::new("\n\n7\n"));
        assert_eq!(reader.next_token().unwrap().as_deref(), Some("7"));
        assert_eq!(reader.next_token().unwrap(), None);
    }
}
