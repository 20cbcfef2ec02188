//! Tag records produced by the engine

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a tag. The letter and name pairings are a format contract
/// external consumers depend on and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Class,
    Property,
    Method,
    Function,
}

impl TagKind {
    /// Stable single-letter identifier
    pub fn letter(&self) -> char {
        match self {
            TagKind::Class => 'c',
            TagKind::Property => 'f',
            TagKind::Method => 'm',
            TagKind::Function => 'F',
        }
    }

    /// Stable kind name
    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Class => "class",
            TagKind::Property => "field",
            TagKind::Method => "method",
            TagKind::Function => "function",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enclosing-scope attribution carried by a tag.
///
/// Captured by value at emission time; the nesting stack keeps mutating
/// after the tag is handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagScope {
    pub kind: String,
    pub name: String,
}

impl TagScope {
    /// Scope attribution to an enclosing class
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            kind: "class".to_string(),
            name: name.into(),
        }
    }
}

/// One recognized declaration. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub kind: TagKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<TagScope>,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, kind: TagKind, line: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            scope: None,
            line,
            span: None,
        }
    }

    pub fn with_scope(mut self, scope: TagScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Tags with empty names can come out of malformed function lines;
    /// sinks must tolerate them, formatters may filter them.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(
                f,
                "{}\t{}\t{}:{}",
                self.name, self.kind, scope.kind, scope.name
            ),
            None => write!(f, "{}\t{}", self.name, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_letter_name_contract() {
        assert_eq!(TagKind::Class.letter(), 'c');
        assert_eq!(TagKind::Class.name(), "class");
        assert_eq!(TagKind::Property.letter(), 'f');
        assert_eq!(TagKind::Property.name(), "field");
        assert_eq!(TagKind::Method.letter(), 'm');
        assert_eq!(TagKind::Method.name(), "method");
        assert_eq!(TagKind::Function.letter(), 'F');
        assert_eq!(TagKind::Function.name(), "function");
    }

    #[test]
    fn test_record_with_scope() {
        let tag = TagRecord::new("bar", TagKind::Method, 7).with_scope(TagScope::class("Foo"));

        assert_eq!(tag.scope.as_ref().unwrap().kind, "class");
        assert_eq!(tag.scope.as_ref().unwrap().name, "Foo");
        assert_eq!(tag.line, 7);
        assert!(tag.has_name());
    }

    #[test]
    fn test_empty_name_is_tolerated() {
        let tag = TagRecord::new("", TagKind::Function, 1);
        assert!(!tag.has_name());
    }

    #[test]
    fn test_serializes_without_empty_scope() {
        let tag = TagRecord::new("standalone", TagKind::Function, 3);
        let json = serde_json::to_string(&tag).unwrap();
        assert!(!json.contains("scope"));
        assert!(json.contains("\"kind\":\"function\""));
    }
}
