//! Word-level scanning for MATLAB-like source
//!
//! The scanner is deliberately not a full tokenizer. It yields one word at
//! a time under MATLAB's punctuation, comment, and string rules; the engine
//! decides what each word means.

pub mod cursor;
pub mod word;

pub use cursor::LineCursor;
pub use word::{
    consume_comment, consume_line, consume_string, enter_sub_mode, is_word_delimiter,
    read_next_word, skip_space, StringScan, SubMode, WORD_DELIMITERS,
};
