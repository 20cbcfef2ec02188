//! Nesting stack for open lexical blocks
//!
//! Strictly LIFO: every open block is pushed and either popped by its
//! matching standalone `end` or abandoned at end of input. The stack also
//! derives the "current class", the most recently pushed class entry,
//! which attributes scope to tags emitted inside it.
//!
//! The current class is tracked by a per-level id rather than a stack
//! index, so it stays valid no matter how the backing storage grows and is
//! cleared exactly when its own entry pops.

/// Kind of an open block on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Class,
    Properties,
    Methods,
    Method,
    Function,
    Control,
}

/// One open block.
#[derive(Debug, Clone)]
pub struct NestingLevel {
    pub name: String,
    pub kind: ScopeKind,
    id: u64,
}

impl NestingLevel {
    /// Identifier unique within the owning stack's lifetime
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// LIFO stack of open blocks with a derived current-class reference.
#[derive(Debug, Default)]
pub struct NestingStack {
    levels: Vec<NestingLevel>,
    current_class: Option<u64>,
    next_id: u64,
}

impl NestingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block. A class push takes over the current-class reference.
    pub fn push(&mut self, name: impl Into<String>, kind: ScopeKind) {
        let id = self.next_id;
        self.next_id += 1;

        if kind == ScopeKind::Class {
            self.current_class = Some(id);
        }

        self.levels.push(NestingLevel {
            name: name.into(),
            kind,
            id,
        });
    }

    /// Close the innermost block. Popping an empty stack is a no-op.
    ///
    /// The current-class reference is cleared only when the entry it points
    /// at is the one being popped.
    pub fn pop(&mut self) -> Option<NestingLevel> {
        let level = self.levels.pop()?;
        if self.current_class == Some(level.id) {
            self.current_class = None;
        }
        Some(level)
    }

    /// The innermost open block, if any
    pub fn top(&self) -> Option<&NestingLevel> {
        self.levels.last()
    }

    /// True iff the innermost open block is a properties block
    pub fn properties_mode(&self) -> bool {
        matches!(self.top(), Some(level) if level.kind == ScopeKind::Properties)
    }

    /// True iff the innermost open block is a methods block
    pub fn methods_mode(&self) -> bool {
        matches!(self.top(), Some(level) if level.kind == ScopeKind::Methods)
    }

    /// Name of the enclosing class, if one is open
    pub fn current_class_name(&self) -> Option<&str> {
        let id = self.current_class?;
        self.levels
            .iter()
            .rev()
            .find(|level| level.id == id)
            .map(|level| level.name.as_str())
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo_order() {
        let mut stack = NestingStack::new();
        stack.push("Foo", ScopeKind::Class);
        stack.push("Methods", ScopeKind::Methods);
        stack.push("bar", ScopeKind::Method);

        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.pop().unwrap().name, "bar");
        assert_eq!(stack.pop().unwrap().name, "Methods");
        assert_eq!(stack.pop().unwrap().name, "Foo");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut stack = NestingStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_mode_queries_track_top_only() {
        let mut stack = NestingStack::new();
        assert!(!stack.properties_mode());
        assert!(!stack.methods_mode());

        stack.push("Foo", ScopeKind::Class);
        stack.push("Properties", ScopeKind::Properties);
        assert!(stack.properties_mode());
        assert!(!stack.methods_mode());

        stack.pop();
        stack.push("Methods", ScopeKind::Methods);
        assert!(stack.methods_mode());
        assert!(!stack.properties_mode());

        // A method on top hides the methods block
        stack.push("bar", ScopeKind::Method);
        assert!(!stack.methods_mode());
    }

    #[test]
    fn test_current_class_set_on_push() {
        let mut stack = NestingStack::new();
        assert_eq!(stack.current_class_name(), None);

        stack.push("Foo", ScopeKind::Class);
        assert_eq!(stack.current_class_name(), Some("Foo"));

        // Class is still current under nested non-class levels
        stack.push("Methods", ScopeKind::Methods);
        stack.push("bar", ScopeKind::Method);
        assert_eq!(stack.current_class_name(), Some("Foo"));
    }

    #[test]
    fn test_current_class_cleared_by_its_own_pop_only() {
        let mut stack = NestingStack::new();
        stack.push("Foo", ScopeKind::Class);
        stack.push("for", ScopeKind::Control);

        stack.pop();
        assert_eq!(stack.current_class_name(), Some("Foo"));

        stack.pop();
        assert_eq!(stack.current_class_name(), None);
    }

    #[test]
    fn test_nested_class_takes_over_current_class() {
        let mut stack = NestingStack::new();
        stack.push("Outer", ScopeKind::Class);
        stack.push("Inner", ScopeKind::Class);
        assert_eq!(stack.current_class_name(), Some("Inner"));

        // Popping the inner class clears the reference; it does not revert
        stack.pop();
        assert_eq!(stack.current_class_name(), None);
    }

    #[test]
    fn test_depth_round_trip() {
        let mut stack = NestingStack::new();
        let before = stack.depth();
        for kind in [
            ScopeKind::Class,
            ScopeKind::Methods,
            ScopeKind::Method,
            ScopeKind::Control,
        ] {
            stack.push("x", kind);
        }
        for _ in 0..4 {
            stack.pop();
        }
        assert_eq!(stack.depth(), before);
    }
}
