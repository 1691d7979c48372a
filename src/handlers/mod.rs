//! Host-side handler resolution.
//!
//! Registries store handlers as dotted-name tokens and never resolve or
//! invoke them. The execution environment owns the name-to-callable
//! mapping; [`HandlerTable`] is that mapping. Keeping it outside the
//! registries means a profile document can be loaded, ordered, checked,
//! and re-serialized without any of its handlers being present.

use std::collections::HashMap;

/// A name-to-handler resolution table.
///
/// Generic over the handler representation: a function pointer, a boxed
/// closure, a trait object - whatever the host executes.
///
/// # Example
///
/// ```
/// use cairn::handlers::HandlerTable;
///
/// let mut table: HandlerTable<fn() -> u32> = HandlerTable::new();
/// table.register("app.steps.one", || 1);
///
/// let handler = table.resolve("app.steps.one").unwrap();
/// assert_eq!(handler(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HandlerTable<H> {
    entries: HashMap<String, H>,
}

impl<H> Default for HandlerTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HandlerTable<H> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a handler under a dotted-name token, returning the
    /// previously registered handler if the token was already taken.
    pub fn register(&mut self, name: impl Into<String>, handler: H) -> Option<H> {
        self.entries.insert(name.into(), handler)
    }

    /// Resolve a token to its handler, if registered.
    pub fn resolve(&self, name: &str) -> Option<&H> {
        self.entries.get(name)
    }

    /// Check if a token is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered tokens, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive a `(title, description)` pair from a handler's documentation text.
///
/// The first line, trimmed, becomes the title. The remaining lines are
/// trimmed and grouped into paragraphs at blank lines; lines within a
/// paragraph are joined with single spaces, paragraphs with blank lines.
/// Callers pass the result to `register_step` when they want
/// documentation-derived defaults; the registries themselves never look
/// at documentation.
pub fn summarize_doc(doc: &str) -> (String, String) {
    let mut lines = doc.lines();
    let title = lines.next().unwrap_or("").trim().to_string();

    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let description = paragraphs
        .iter()
        .map(|p| p.join(" "))
        .collect::<Vec<_>>()
        .join("\n\n");

    (title, description)
}
