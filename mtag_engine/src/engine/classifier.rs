//! Keyword classifier and tag emitter
//!
//! Given one word, the unconsumed remainder of the line, and the live
//! nesting stack, decide whether to emit a tag, push or pop a scope, or
//! ignore the word. Rules are evaluated in priority order; the first match
//! wins.

use super::context::{Diagnostic, ParseContext};
use crate::log_debug;
use crate::nesting::ScopeKind;
use crate::scanner::{self, LineCursor};
use crate::tags::{TagKind, TagRecord, TagScope, TagSink};
use crate::utils::{Span, Spanned};

/// Keywords that open a control block. They exist only to keep nested
/// `end` matching balanced; no tag is emitted for them.
pub const CONTROL_KEYWORDS: [&str; 4] = ["for", "if", "while", "switch"];

/// Check whether a word opens a control block
pub fn is_control_flow_block(word: &str) -> bool {
    CONTROL_KEYWORDS.contains(&word)
}

/// Process one word against the live context.
///
/// The cursor is positioned just past the word; several rules consume more
/// of the line from there.
pub fn process_word(
    word: &Spanned<String>,
    cursor: &mut LineCursor<'_>,
    ctx: &mut ParseContext,
    sink: &mut dyn TagSink,
) {
    let text = word.value.as_str();

    if text.starts_with('\'') {
        let scan = scanner::consume_string(cursor);
        ctx.metrics.string_literals += 1;
        if !scan.terminated {
            ctx.record_diagnostic(Diagnostic::UnterminatedString {
                line: cursor.line(),
            });
        }
    } else if ctx.stack.properties_mode() && text != "end" {
        // Anything named inside a properties block is a field; default
        // values and type annotations on the rest of the line are ignored
        emit_tag(text, TagKind::Property, word.span, ctx, sink);
        scanner::consume_line(cursor);
    } else if text == "classdef" {
        scanner::skip_space(cursor);
        let name = scanner::read_next_word(cursor);
        // Emitted before the push, so the class tag itself is not scoped
        // to the class it declares
        emit_tag(&name.value, TagKind::Class, name.span, ctx, sink);
        push_level(ctx, name.value, ScopeKind::Class, cursor);
    } else if text == "properties" {
        push_level(ctx, "Properties", ScopeKind::Properties, cursor);
        scanner::consume_line(cursor);
    } else if text == "methods" {
        push_level(ctx, "Methods", ScopeKind::Methods, cursor);
        scanner::consume_line(cursor);
    } else if text == "function" {
        let name = find_function_name(cursor);
        if name.value.is_empty() {
            ctx.record_diagnostic(Diagnostic::EmptyFunctionName {
                line: cursor.line(),
            });
        }
        if ctx.stack.methods_mode() {
            emit_tag(&name.value, TagKind::Method, name.span, ctx, sink);
            push_level(ctx, name.value, ScopeKind::Method, cursor);
        } else {
            emit_tag(&name.value, TagKind::Function, name.span, ctx, sink);
            push_level(ctx, name.value, ScopeKind::Function, cursor);
        }
    } else if is_control_flow_block(text) {
        push_level(ctx, text, ScopeKind::Control, cursor);
    } else if text == "end" {
        if is_block_end(cursor) {
            if ctx.stack.pop().is_none() {
                ctx.record_diagnostic(Diagnostic::UnmatchedBlockEnd {
                    line: cursor.line(),
                });
            }
        }
        // `end` inside an expression, like x(end), closes nothing
    }
}

/// Locate the function or method name in a signature.
///
/// Handles the output-argument form `function [a,b] = name(...)` by
/// skipping past the first `=` on the line when one is present.
pub fn find_function_name(cursor: &mut LineCursor<'_>) -> Spanned<String> {
    scanner::skip_space(cursor);

    if let Some(eq) = cursor.remainder().find('=') {
        cursor.set_offset(cursor.offset() + eq + 1);
    }
    scanner::skip_space(cursor);

    scanner::read_next_word(cursor)
}

/// Decide whether an `end` stands alone as a statement.
///
/// True when, after whitespace, the line is exhausted or the next byte is
/// `;`. A syntactic test only; `x(end)` fails it because `)` follows.
pub fn is_block_end(cursor: &mut LineCursor<'_>) -> bool {
    scanner::skip_space(cursor);
    matches!(cursor.peek(), None | Some(b';'))
}

fn emit_tag(
    name: &str,
    kind: TagKind,
    span: Span,
    ctx: &mut ParseContext,
    sink: &mut dyn TagSink,
) {
    if !ctx.allow_tag() {
        return;
    }

    // Scope is captured by value here; the stack keeps mutating afterwards
    let mut tag = TagRecord::new(name, kind, span.start.line).with_span(span);
    if let Some(class_name) = ctx.stack.current_class_name() {
        tag = tag.with_scope(TagScope::class(class_name));
    }

    if ctx.preferences().log_emitted_tags {
        log_debug!("Emitted tag",
            "name" => tag.name,
            "kind" => tag.kind,
            "line" => tag.line
        );
    }

    ctx.metrics.tags_emitted += 1;
    sink.accept(tag);
}

fn push_level(
    ctx: &mut ParseContext,
    name: impl Into<String>,
    kind: ScopeKind,
    cursor: &LineCursor<'_>,
) {
    ctx.stack.push(name, kind);
    ctx.note_depth(cursor.line());
}
