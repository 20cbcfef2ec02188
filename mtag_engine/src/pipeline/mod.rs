mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::{format_result, JsonOutput, OutputFormat};
pub use result::TagFileResult;

use crate::config::runtime::Preferences;
use crate::engine;
use crate::logging;
use crate::logging::codes;
use crate::tags::CollectingSink;
use std::path::PathBuf;
use std::time::Instant;

/// Process a single file through the complete pipeline
/// (file -> word scan -> classify -> tags).
pub fn process_file(file_path: &str) -> Result<TagFileResult, PipelineError> {
    process_file_with_preferences(file_path, &Preferences::default(), 0)
}

/// Process a single file with explicit preferences.
///
/// The file id distinguishes threads in batch runs; single-file callers
/// pass 0.
pub fn process_file_with_preferences(
    file_path: &str,
    preferences: &Preferences,
    file_id: usize,
) -> Result<TagFileResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), file_id, || {
        crate::log_debug!("Starting tag extraction pipeline", "file" => file_path);

        // Stage 1: read and validate the file
        let processor =
            crate::file_processor::create_processor_from_preferences(&preferences.file_processor);
        let file_result = processor.process_file(file_path)?;

        // Stage 2: one engine pass with a fresh context
        let mut ctx = engine::ParseContext::new(preferences.engine.clone());
        let mut sink = CollectingSink::new();
        let mut source = file_result.line_source();
        engine::run(&mut source, &mut ctx, &mut sink);

        crate::log_success!(codes::success::SCAN_COMPLETE, "Engine pass complete",
            "lines" => ctx.metrics.lines_processed,
            "words" => ctx.metrics.words_scanned,
            "tags" => ctx.metrics.tags_emitted);

        let mut tags = sink.into_tags();
        if preferences.engine.filter_empty_names {
            tags.retain(|t| t.has_name());
        }

        let result = TagFileResult {
            file_metadata: file_result.metadata.clone(),
            tags,
            diagnostics: ctx.take_diagnostics(),
            engine_metrics: ctx.metrics.clone(),
            processing_duration: start_time.elapsed(),
        };

        result.log_success(file_path);

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagKind;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("shape.m");
        fs::write(
            &file_path,
            "classdef Shape\n  properties\n    width\n    height = 0\n  end\n  methods\n    function a = area(obj)\n      a = obj.width * obj.height;\n    end\n  end\nend\n",
        )
        .unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();

        let names: Vec<&str> = result.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Shape", "width", "height", "area"]);
        assert_eq!(result.tags[3].kind, TagKind::Method);
        assert_eq!(result.tags[3].scope.as_ref().unwrap().name, "Shape");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_pipeline_missing_file() {
        let result = process_file("does-not-exist.m");
        assert_matches!(result.unwrap_err(), PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_pipeline_empty_name_filtering() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.m");
        fs::write(&file_path, "function\nend\n").unwrap();

        let mut prefs = Preferences::default();
        prefs.engine.filter_empty_names = false;
        prefs.engine.record_diagnostics = true;
        let kept =
            process_file_with_preferences(file_path.to_str().unwrap(), &prefs, 0).unwrap();
        assert_eq!(kept.tags.len(), 1);
        assert!(!kept.tags[0].has_name());

        prefs.engine.filter_empty_names = true;
        let filtered =
            process_file_with_preferences(file_path.to_str().unwrap(), &prefs, 0).unwrap();
        assert!(filtered.tags.is_empty());
        // The diagnostic still reports the nameless declaration
        assert!(!filtered.diagnostics.is_empty());
    }
}
