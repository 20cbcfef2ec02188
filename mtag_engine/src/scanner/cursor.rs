//! Byte cursor over a single source line
//!
//! The engine processes one line at a time, so the cursor never crosses a
//! line boundary. Offsets are byte offsets into the line; columns are
//! 1-based byte columns.

use crate::utils::{Position, Span};

/// A cursor over the bytes of one line of source text.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    text: &'a str,
    offset: usize,
    line: u32,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor at the start of a line (line numbers are 1-based)
    pub fn new(text: &'a str, line: u32) -> Self {
        Self {
            text,
            offset: 0,
            line,
        }
    }

    /// The byte at the cursor, or None at end of line
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.offset).copied()
    }

    /// Advance the cursor one byte, clamped at end of line
    pub fn advance(&mut self) {
        if self.offset < self.text.len() {
            self.offset += 1;
        }
    }

    /// Current byte offset within the line
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the cursor to an absolute offset, clamped to the line length
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.text.len());
    }

    /// Line number this cursor scans (1-based)
    pub fn line(&self) -> u32 {
        self.line
    }

    /// True once every byte of the line has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.text.len()
    }

    /// The unconsumed remainder of the line
    pub fn remainder(&self) -> &'a str {
        &self.text[self.offset.min(self.text.len())..]
    }

    /// The full line text
    pub fn line_text(&self) -> &'a str {
        self.text
    }

    /// Position of the cursor for spans and diagnostics
    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.offset as u32 + 1)
    }

    /// Span from a previously captured position to the cursor
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position())
    }
}
