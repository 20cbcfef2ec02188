//! Per-file parse context
//!
//! Everything mutable during one file's pass lives here: the nesting
//! stack, metrics, and the non-fatal diagnostics channel. Each file gets a
//! fresh context; nothing is shared across files.

use crate::config::compile_time::engine::{MAX_DIAGNOSTICS_PER_FILE, MAX_TAGS_PER_FILE};
use crate::config::runtime::EnginePreferences;
use crate::logging::codes;
use crate::logging::Code;
use crate::nesting::NestingStack;
use serde::Serialize;
use std::fmt;

/// Non-fatal conditions noticed during a pass.
///
/// None of these stop processing; the engine degrades silently and callers
/// that want visibility read these off the context afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A standalone `end` arrived with nothing open
    UnmatchedBlockEnd { line: u32 },
    /// Input ran out with blocks still open; they are abandoned
    BlocksOpenAtEof { open: usize },
    /// A `function` line yielded no name; an empty-name tag was emitted
    EmptyFunctionName { line: u32 },
    /// A string literal ran to end of line without a closing quote
    UnterminatedString { line: u32 },
    /// The per-file tag cap was reached; further tags are dropped
    TagLimitReached { limit: usize },
    /// The nesting depth threshold was reached; pushes still go through
    NestingLimitReached { line: u32, depth: usize },
}

impl Diagnostic {
    pub fn code(&self) -> Code {
        match self {
            Diagnostic::UnmatchedBlockEnd { .. } => codes::engine::UNMATCHED_BLOCK_END,
            Diagnostic::BlocksOpenAtEof { .. } => codes::engine::BLOCKS_OPEN_AT_EOF,
            Diagnostic::EmptyFunctionName { .. } => codes::engine::EMPTY_FUNCTION_NAME,
            Diagnostic::UnterminatedString { .. } => codes::scanner::UNTERMINATED_STRING,
            Diagnostic::TagLimitReached { .. } => codes::engine::TAG_LIMIT_REACHED,
            Diagnostic::NestingLimitReached { .. } => codes::engine::NESTING_LIMIT_REACHED,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedBlockEnd { line } => {
                write!(f, "line {}: 'end' with no open block", line)
            }
            Diagnostic::BlocksOpenAtEof { open } => {
                write!(f, "{} block(s) still open at end of input", open)
            }
            Diagnostic::EmptyFunctionName { line } => {
                write!(f, "line {}: function declaration with no name", line)
            }
            Diagnostic::UnterminatedString { line } => {
                write!(f, "line {}: unterminated string literal", line)
            }
            Diagnostic::TagLimitReached { limit } => {
                write!(f, "tag limit of {} reached; further tags dropped", limit)
            }
            Diagnostic::NestingLimitReached { line, depth } => {
                write!(f, "line {}: nesting depth reached {}", line, depth)
            }
        }
    }
}

/// Counters accumulated over one file.
#[derive(Debug, Default, Clone, Serialize)]
pub struct EngineMetrics {
    pub lines_processed: usize,
    pub words_scanned: usize,
    pub tags_emitted: usize,
    pub string_literals: usize,
    pub comment_lines: usize,
    pub max_nesting_depth: usize,
}

/// State for one file's pass.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub stack: NestingStack,
    pub metrics: EngineMetrics,
    preferences: EnginePreferences,
    diagnostics: Vec<Diagnostic>,
    tag_limit_hit: bool,
}

impl ParseContext {
    pub fn new(preferences: EnginePreferences) -> Self {
        Self {
            stack: NestingStack::new(),
            metrics: EngineMetrics::default(),
            preferences,
            diagnostics: Vec::new(),
            tag_limit_hit: false,
        }
    }

    pub fn preferences(&self) -> &EnginePreferences {
        &self.preferences
    }

    /// Record a non-fatal diagnostic, bounded and preference-gated
    pub fn record_diagnostic(&mut self, diagnostic: Diagnostic) {
        if !self.preferences.record_diagnostics {
            return;
        }
        if self.diagnostics.len() < MAX_DIAGNOSTICS_PER_FILE {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// True while the per-file tag cap has headroom. The first refusal
    /// records a diagnostic.
    pub fn allow_tag(&mut self) -> bool {
        if self.metrics.tags_emitted < MAX_TAGS_PER_FILE {
            return true;
        }
        if !self.tag_limit_hit {
            self.tag_limit_hit = true;
            self.record_diagnostic(Diagnostic::TagLimitReached {
                limit: MAX_TAGS_PER_FILE,
            });
        }
        false
    }

    /// Track the high-water mark after a push
    pub fn note_depth(&mut self, line: u32) {
        let depth = self.stack.depth();
        if depth > self.metrics.max_nesting_depth {
            self.metrics.max_nesting_depth = depth;
            if depth == crate::config::compile_time::engine::MAX_NESTING_DEPTH {
                self.record_diagnostic(Diagnostic::NestingLimitReached { line, depth });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_gated_by_preference() {
        let mut silent = ParseContext::new(EnginePreferences {
            record_diagnostics: false,
            ..EnginePreferences::default()
        });
        silent.record_diagnostic(Diagnostic::UnmatchedBlockEnd { line: 1 });
        assert!(silent.diagnostics().is_empty());

        let mut recording = ParseContext::new(EnginePreferences {
            record_diagnostics: true,
            ..EnginePreferences::default()
        });
        recording.record_diagnostic(Diagnostic::UnmatchedBlockEnd { line: 1 });
        assert_eq!(recording.diagnostics().len(), 1);
    }

    #[test]
    fn test_diagnostic_codes() {
        let d = Diagnostic::BlocksOpenAtEof { open: 2 };
        assert_eq!(d.code().as_str(), "E041");
        let d = Diagnostic::UnterminatedString { line: 4 };
        assert_eq!(d.code().as_str(), "E021");
    }

    #[test]
    fn test_tag_cap() {
        let mut ctx = ParseContext::new(EnginePreferences {
            record_diagnostics: true,
            ..EnginePreferences::default()
        });
        ctx.metrics.tags_emitted = crate::config::compile_time::engine::MAX_TAGS_PER_FILE;

        assert!(!ctx.allow_tag());
        assert!(!ctx.allow_tag());
        // The refusal is reported once
        assert_eq!(ctx.diagnostics().len(), 1);
    }
}
