//! Line driver
//!
//! Pulls lines from a line source and walks each one word by word,
//! handing every non-empty word to the classifier. Processing is
//! single-threaded and synchronous; one line is fully consumed before the
//! next is pulled.

use super::classifier;
use super::context::{Diagnostic, ParseContext};
use crate::scanner::{self, LineCursor};
use crate::tags::TagSink;

/// Pull-based source of text lines, terminators already stripped.
pub trait LineSource {
    fn next_line(&mut self) -> Option<&str>;
}

/// Line source over an in-memory string.
pub struct StringLineSource<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> StringLineSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }
}

impl LineSource for StringLineSource<'_> {
    fn next_line(&mut self) -> Option<&str> {
        self.lines.next()
    }
}

/// Drive a full pass: pull every line from the source, process it, and
/// note any blocks left open once the source is exhausted.
pub fn run<S>(source: &mut S, ctx: &mut ParseContext, sink: &mut dyn TagSink)
where
    S: LineSource + ?Sized,
{
    let mut line_number: u32 = 0;
    while let Some(line) = source.next_line() {
        line_number += 1;
        process_line(line, line_number, ctx, sink);
    }

    if !ctx.stack.is_empty() {
        // Abandoned, not an error
        ctx.record_diagnostic(Diagnostic::BlocksOpenAtEof {
            open: ctx.stack.depth(),
        });
    }
}

/// Process one line: scan words left to right until the line is exhausted
/// or a comment starts.
pub fn process_line(line: &str, line_number: u32, ctx: &mut ParseContext, sink: &mut dyn TagSink) {
    let mut cursor = LineCursor::new(line, line_number);
    ctx.metrics.lines_processed += 1;

    while !cursor.is_exhausted() {
        scanner::skip_space(&mut cursor);

        // Whole-line comment check; the word scanner stops at '%' as well
        if cursor.peek() == Some(b'%') {
            ctx.metrics.comment_lines += 1;
            break;
        }

        let word = scanner::read_next_word(&mut cursor);
        if !word.value.is_empty() {
            ctx.metrics.words_scanned += 1;
            classifier::process_word(&word, &mut cursor, ctx, sink);
        }

        // Step over the byte the scanner stopped on
        cursor.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::EnginePreferences;
    use crate::tags::{CollectingSink, TagKind};

    fn run_on(text: &str) -> (Vec<crate::tags::TagRecord>, ParseContext) {
        let mut ctx = ParseContext::new(EnginePreferences {
            filter_empty_names: false,
            record_diagnostics: true,
            log_emitted_tags: false,
        });
        let mut sink = CollectingSink::new();
        let mut source = StringLineSource::new(text);
        run(&mut source, &mut ctx, &mut sink);
        (sink.into_tags(), ctx)
    }

    #[test]
    fn test_comment_line_is_skipped() {
        let (tags, ctx) = run_on("% classdef NotReal\nfunction f()\nend\n");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "f");
        assert_eq!(ctx.metrics.comment_lines, 1);
    }

    #[test]
    fn test_indented_comment_line_is_skipped() {
        let (tags, _) = run_on("   % properties\n");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_trailing_comment_stops_the_line() {
        let (tags, _) = run_on("x = 1 % function ghost()\n");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_balanced_blocks_round_trip() {
        let text = "if a\nfor i\nwhile b\nswitch c\nend\nend\nend\nend\n";
        let (tags, ctx) = run_on(text);
        assert!(tags.is_empty());
        assert_eq!(ctx.stack.depth(), 0);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_open_blocks_at_eof_are_abandoned() {
        let (tags, ctx) = run_on("function f()\nif x\n");
        assert_eq!(tags.len(), 1);
        assert_eq!(ctx.stack.depth(), 2);
        assert!(ctx
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::BlocksOpenAtEof { open: 2 })));
    }

    #[test]
    fn test_properties_block() {
        let text = "properties\n  a\n  b = 5\nend\n";
        let (tags, ctx) = run_on(text);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "a");
        assert_eq!(tags[1].name, "b");
        assert!(tags.iter().all(|t| t.kind == TagKind::Property));
        assert_eq!(ctx.stack.depth(), 0);
    }

    #[test]
    fn test_end_to_end_classdef() {
        let text = "classdef Foo\n  properties\n    a\n    b = 1\n  end\n  methods\n    function y = bar(x)\n      y = x+1;\n    end\n  end\nend\n";
        let (tags, ctx) = run_on(text);

        let summary: Vec<(&str, TagKind, Option<&str>)> = tags
            .iter()
            .map(|t| {
                (
                    t.name.as_str(),
                    t.kind,
                    t.scope.as_ref().map(|s| s.name.as_str()),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Foo", TagKind::Class, None),
                ("a", TagKind::Property, Some("Foo")),
                ("b", TagKind::Property, Some("Foo")),
                ("bar", TagKind::Method, Some("Foo")),
            ]
        );
        assert_eq!(ctx.stack.depth(), 0);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_everything_in_classdef_scoped_to_it() {
        let text = "classdef X\n  methods\n    function a()\n    end\n    function b()\n    end\n  end\nend\n";
        let (tags, _) = run_on(text);

        assert_eq!(tags[0].name, "X");
        for tag in &tags[1..] {
            assert_eq!(tag.scope.as_ref().unwrap().name, "X");
        }
    }

    #[test]
    fn test_x_end_statement_mutates_nothing() {
        let (tags, ctx) = run_on("for i\ny = x(end)\nend\n");
        assert!(tags.is_empty());
        assert_eq!(ctx.stack.depth(), 0);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_string_containing_keywords_is_inert() {
        let (tags, _) = run_on("s = 'classdef properties function end'\n");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_unterminated_string_closes_at_eol() {
        let text = "s = 'oops\nfunction f()\nend\n";
        let (tags, ctx) = run_on(text);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "f");
        assert!(ctx
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::UnterminatedString { line: 1 })));
    }

    #[test]
    fn test_tags_carry_line_numbers() {
        let (tags, _) = run_on("classdef Foo\nend\nfunction g()\nend\n");
        assert_eq!(tags[0].line, 1);
        assert_eq!(tags[1].line, 3);
    }

    #[test]
    fn test_empty_input() {
        let (tags, ctx) = run_on("");
        assert!(tags.is_empty());
        assert_eq!(ctx.metrics.lines_processed, 0);
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_depth_threshold_never_drops_pushes() {
        let threshold = crate::config::compile_time::engine::MAX_NESTING_DEPTH;
        let source = "if x\n".repeat(threshold + 44);
        let (tags, ctx) = run_on(&source);

        assert!(tags.is_empty());
        // Every open is tracked; the threshold only records a diagnostic
        assert_eq!(ctx.stack.depth(), threshold + 44);
        assert_eq!(ctx.metrics.max_nesting_depth, threshold + 44);

        let threshold_hits = ctx
            .diagnostics()
            .iter()
            .filter(|d| matches!(d, Diagnostic::NestingLimitReached { .. }))
            .count();
        assert_eq!(threshold_hits, 1);
    }
}
