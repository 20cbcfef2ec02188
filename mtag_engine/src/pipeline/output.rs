//! Output formatting for tag results
//!
//! Three formats: a human-readable text listing, a ctags-style tag file,
//! and JSON. Text and ctags drop empty-name tags; JSON keeps the full
//! record list so downstream tooling sees exactly what the engine emitted.

use super::result::TagFileResult;
use crate::engine::{Diagnostic, EngineMetrics};
use crate::tags::TagRecord;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Ctags,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "ctags" => Some(OutputFormat::Ctags),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Serializable view of one file's results for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub file: String,
    pub tags: &'a [TagRecord],
    pub diagnostics: &'a [Diagnostic],
    pub metrics: &'a EngineMetrics,
}

/// Render a result in the requested format
pub fn format_result(result: &TagFileResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(result),
        OutputFormat::Ctags => format_ctags(result),
        OutputFormat::Json => format_json(result).unwrap_or_default(),
    }
}

/// Human-readable listing, one tag per line, in emission order
pub fn format_text(result: &TagFileResult) -> String {
    let mut out = String::new();
    for tag in result.named_tags() {
        match &tag.scope {
            Some(scope) => out.push_str(&format!(
                "{}\t{}\t{}:{}\tline {}\n",
                tag.name,
                tag.kind.name(),
                scope.kind,
                scope.name,
                tag.line
            )),
            None => out.push_str(&format!(
                "{}\t{}\tline {}\n",
                tag.name,
                tag.kind.name(),
                tag.line
            )),
        }
    }
    out
}

/// Ctags-style tag file lines, sorted by tag name
pub fn format_ctags(result: &TagFileResult) -> String {
    let file = result.file_metadata.path.display().to_string();

    let mut lines: Vec<String> = result
        .named_tags()
        .map(|tag| {
            let mut line = format!(
                "{}\t{}\t{};\"\t{}",
                tag.name,
                file,
                tag.line,
                tag.kind.letter()
            );
            if let Some(scope) = &tag.scope {
                line.push_str(&format!("\t{}:{}", scope.kind, scope.name));
            }
            line
        })
        .collect();

    lines.sort();
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// JSON output with the unfiltered tag list
pub fn format_json(result: &TagFileResult) -> Result<String, serde_json::Error> {
    let output = JsonOutput {
        file: result.file_metadata.path.display().to_string(),
        tags: &result.tags,
        diagnostics: &result.diagnostics,
        metrics: &result.engine_metrics,
    };
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileMetadata;
    use crate::tags::{TagKind, TagScope};
    use std::path::PathBuf;
    use std::time::Duration;

    fn result_with_tags(tags: Vec<TagRecord>) -> TagFileResult {
        TagFileResult {
            file_metadata: FileMetadata {
                path: PathBuf::from("foo.m"),
                size: 1,
                extension: Some("m".to_string()),
                line_count: 1,
                is_matlab_file: true,
                modified: None,
            },
            tags,
            diagnostics: Vec::new(),
            engine_metrics: EngineMetrics::default(),
            processing_duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_text_format() {
        let result = result_with_tags(vec![
            TagRecord::new("Foo", TagKind::Class, 1),
            TagRecord::new("bar", TagKind::Method, 3).with_scope(TagScope::class("Foo")),
        ]);

        let text = format_text(&result);
        assert!(text.contains("Foo\tclass\tline 1"));
        assert!(text.contains("bar\tmethod\tclass:Foo\tline 3"));
    }

    #[test]
    fn test_ctags_format_uses_letters_and_sorts() {
        let result = result_with_tags(vec![
            TagRecord::new("zeta", TagKind::Function, 5),
            TagRecord::new("alpha", TagKind::Class, 1),
        ]);

        let out = format_ctags(&result);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("alpha\tfoo.m\t1;\"\tc"));
        assert!(lines[1].starts_with("zeta\tfoo.m\t5;\"\tF"));
    }

    #[test]
    fn test_text_and_ctags_drop_empty_names_json_keeps_them() {
        let result = result_with_tags(vec![
            TagRecord::new("", TagKind::Function, 2),
            TagRecord::new("ok", TagKind::Function, 4),
        ]);

        assert!(!format_text(&result).contains("\t\t"));
        assert_eq!(format_ctags(&result).lines().count(), 1);

        let json = format_json(&result).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["tags"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("ctags"), Some(OutputFormat::Ctags));
        assert_eq!(OutputFormat::from_str("bogus"), None);
    }
}
