use crate::engine::{Diagnostic, EngineMetrics};
use crate::file_processor::FileMetadata;
use crate::tags::TagRecord;
use std::time::Duration;

/// Everything one file's pass through the pipeline produced.
#[derive(Debug)]
pub struct TagFileResult {
    pub file_metadata: FileMetadata,
    pub tags: Vec<TagRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub engine_metrics: EngineMetrics,
    pub processing_duration: Duration,
}

impl TagFileResult {
    /// Tags with the empty-name records dropped.
    ///
    /// Empty names come out of malformed function lines; the engine emits
    /// them so sinks see everything, but most output formats want them
    /// gone.
    pub fn named_tags(&self) -> impl Iterator<Item = &TagRecord> {
        self.tags.iter().filter(|t| t.has_name())
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::TAGGING_COMPLETE,
            "Tag extraction completed",
            "file" => file_path,
            "tags" => self.tags.len(),
            "lines" => self.engine_metrics.lines_processed,
            "diagnostics" => self.diagnostics.len(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagKind;
    use std::path::PathBuf;

    fn metadata() -> FileMetadata {
        FileMetadata {
            path: PathBuf::from("test.m"),
            size: 10,
            extension: Some("m".to_string()),
            line_count: 2,
            is_matlab_file: true,
            modified: None,
        }
    }

    #[test]
    fn test_named_tags_filters_empty_names() {
        let result = TagFileResult {
            file_metadata: metadata(),
            tags: vec![
                TagRecord::new("f", TagKind::Function, 1),
                TagRecord::new("", TagKind::Function, 2),
            ],
            diagnostics: Vec::new(),
            engine_metrics: EngineMetrics::default(),
            processing_duration: Duration::ZERO,
        };

        let named: Vec<_> = result.named_tags().collect();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name, "f");
        // The raw list still carries both
        assert_eq!(result.tags.len(), 2);
    }
}
