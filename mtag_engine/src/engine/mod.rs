//! The tag extraction engine
//!
//! Combines the word scanner, nesting stack, and keyword classifier into a
//! single pass over a file's lines. The engine itself never fails; every
//! anomaly is handled by best-effort degradation, optionally surfaced
//! through the diagnostics channel on the parse context.

pub mod classifier;
pub mod context;
pub mod driver;

pub use classifier::{find_function_name, is_block_end, is_control_flow_block, CONTROL_KEYWORDS};
pub use context::{Diagnostic, EngineMetrics, ParseContext};
pub use driver::{process_line, run, LineSource, StringLineSource};

use crate::config::runtime::EnginePreferences;
use crate::tags::{CollectingSink, TagRecord};

/// Everything one pass produced.
#[derive(Debug)]
pub struct TagExtraction {
    pub tags: Vec<TagRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: EngineMetrics,
}

/// Run a full pass over in-memory source text and collect the results.
pub fn extract_tags(text: &str, preferences: EnginePreferences) -> TagExtraction {
    let mut ctx = ParseContext::new(preferences);
    let mut sink = CollectingSink::new();
    let mut source = StringLineSource::new(text);

    run(&mut source, &mut ctx, &mut sink);

    TagExtraction {
        tags: sink.into_tags(),
        diagnostics: ctx.take_diagnostics(),
        metrics: ctx.metrics.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagKind;

    #[test]
    fn test_extract_tags_from_script() {
        let result = extract_tags(
            "function out = helper(in)\nout = in;\nend\n",
            EnginePreferences::default(),
        );

        assert_eq!(result.tags.len(), 1);
        assert_eq!(result.tags[0].kind, TagKind::Function);
        assert_eq!(result.metrics.lines_processed, 3);
    }

    #[test]
    fn test_fresh_state_per_extraction() {
        let first = extract_tags("classdef A\n", EnginePreferences::default());
        let second = extract_tags("function f()\nend\n", EnginePreferences::default());

        // The open classdef in the first input must not scope the second
        assert_eq!(first.tags[0].name, "A");
        assert!(second.tags[0].scope.is_none());
    }
}
