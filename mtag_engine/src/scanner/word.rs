//! Word scanner for MATLAB-like source lines
//!
//! Segments a line into one lexical token at a time. A word ends at
//! whitespace, end of line, or any byte in the delimiter set. `%` starts a
//! line comment and `'` starts a string literal; both are handled as
//! explicit sub-modes so each can be exercised on its own.

use super::cursor::LineCursor;
use crate::config::compile_time::scanner::MAX_WORD_LENGTH;
use crate::logging;
use crate::logging::codes;
use crate::utils::{Span, Spanned};

/// Punctuation bytes that terminate a word.
pub const WORD_DELIMITERS: &[u8] = b";,.[]()|=!<>+-*/";

/// Check whether a byte terminates a word
pub fn is_word_delimiter(byte: u8) -> bool {
    WORD_DELIMITERS.contains(&byte)
}

/// Sub-modes the scanner drops into from normal word scanning.
///
/// `StringLiteral` is entered at an opening `'` and exits on the matching
/// `'` or at end of line. `LineComment` is entered at `%` and exits only at
/// end of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubMode {
    StringLiteral,
    LineComment,
}

/// Outcome of scanning a string literal sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringScan {
    /// False when the line ended before a closing quote was found
    pub terminated: bool,
    /// The bytes covered, from entry point to exit point
    pub span: Span,
}

/// Advance past whitespace
pub fn skip_space(cursor: &mut LineCursor<'_>) {
    while let Some(byte) = cursor.peek() {
        if !byte.is_ascii_whitespace() {
            break;
        }
        cursor.advance();
    }
}

/// Read the next word from the line.
///
/// Skips leading whitespace, then consumes bytes until whitespace, end of
/// line, or a delimiter. Hitting `%` mid-scan discards the rest of the line
/// and returns whatever was accumulated, possibly nothing. Callers must
/// treat an empty result as "no token produced".
pub fn read_next_word(cursor: &mut LineCursor<'_>) -> Spanned<String> {
    skip_space(cursor);

    let start = cursor.position();
    let word_start = cursor.offset();
    let mut hit_comment = false;

    while let Some(byte) = cursor.peek() {
        if byte.is_ascii_whitespace() || is_word_delimiter(byte) {
            break;
        }
        if byte == b'%' {
            hit_comment = true;
            break;
        }
        cursor.advance();
    }

    // Word boundaries are always ASCII bytes, so the slice stays valid
    let mut word = cursor.line_text()[word_start..cursor.offset()].to_string();
    let span = cursor.span_from(start);
    if hit_comment {
        consume_comment(cursor);
    }

    if word.len() > MAX_WORD_LENGTH {
        let mut cut = MAX_WORD_LENGTH;
        while !word.is_char_boundary(cut) {
            cut -= 1;
        }
        word.truncate(cut);
        if let Some(logger) = logging::try_get_global_logger() {
            logger.log_warning_with_code(
                codes::scanner::WORD_TRUNCATED,
                &format!("Word longer than {} bytes truncated", MAX_WORD_LENGTH),
            );
        }
    }

    Spanned::new(word, span)
}

/// Advance to end of line or to a `;`, leaving the cursor one byte before
/// that point so the driver's single-step advance lands exactly on it.
pub fn consume_line(cursor: &mut LineCursor<'_>) {
    let mut target = cursor.offset();
    let bytes = cursor.line_text().as_bytes();
    while target < bytes.len() && bytes[target] != b';' {
        target += 1;
    }
    cursor.set_offset(target.saturating_sub(1));
}

/// String literal sub-mode.
///
/// Steps over the byte at the cursor, then advances until the closing `'`
/// or end of line. An unterminated string is treated as implicitly closed
/// at end of line; the flag in the result lets callers record that.
pub fn consume_string(cursor: &mut LineCursor<'_>) -> StringScan {
    let start = cursor.position();

    cursor.advance();
    let mut terminated = false;
    while let Some(byte) = cursor.peek() {
        if byte == b'\'' {
            terminated = true;
            break;
        }
        cursor.advance();
    }

    StringScan {
        terminated,
        span: cursor.span_from(start),
    }
}

/// Line comment sub-mode: discard everything to end of line
pub fn consume_comment(cursor: &mut LineCursor<'_>) {
    cursor.set_offset(cursor.line_text().len());
}

/// Run a sub-mode from the current cursor position
pub fn enter_sub_mode(cursor: &mut LineCursor<'_>, mode: SubMode) -> Option<StringScan> {
    match mode {
        SubMode::StringLiteral => Some(consume_string(cursor)),
        SubMode::LineComment => {
            consume_comment(cursor);
            None
        }
    }
}
