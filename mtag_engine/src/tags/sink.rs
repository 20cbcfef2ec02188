//! Tag sinks
//!
//! The engine pushes finalized records into a sink one at a time. Sinks
//! must accept empty-name tags without failing; filtering is a formatting
//! concern, not a sink concern.

use super::record::TagRecord;

/// Receives finalized tag records from the engine.
pub trait TagSink {
    fn accept(&mut self, tag: TagRecord);
}

/// Sink that collects every record in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    tags: Vec<TagRecord>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[TagRecord] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<TagRecord> {
        self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagSink for CollectingSink {
    fn accept(&mut self, tag: TagRecord) {
        self.tags.push(tag);
    }
}

impl<F> TagSink for F
where
    F: FnMut(TagRecord),
{
    fn accept(&mut self, tag: TagRecord) {
        self(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::record::TagKind;

    #[test]
    fn test_collecting_sink_preserves_order() {
        let mut sink = CollectingSink::new();
        sink.accept(TagRecord::new("Foo", TagKind::Class, 1));
        sink.accept(TagRecord::new("a", TagKind::Property, 2));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.tags()[0].name, "Foo");
        assert_eq!(sink.tags()[1].name, "a");
    }

    #[test]
    fn test_closure_sink() {
        let mut names = Vec::new();
        {
            let mut sink = |tag: TagRecord| names.push(tag.name);
            sink.accept(TagRecord::new("bar", TagKind::Method, 3));
        }
        assert_eq!(names, vec!["bar"]);
    }

    #[test]
    fn test_sink_tolerates_empty_names() {
        let mut sink = CollectingSink::new();
        sink.accept(TagRecord::new("", TagKind::Function, 9));
        assert_eq!(sink.len(), 1);
        assert!(!sink.tags()[0].has_name());
    }
}
