use std::collections::HashMap;

use tokenforge_protocol::DottedPath;

use crate::document::TokenDocument;

/// Dotted path → raw (one-hop) value, indexed from one or more token sets.
///
/// Documents are merged by repeated [`ReferenceMap::index`] calls. A later
/// document's entry for an identical path replaces the earlier one without
/// notice, which is how Sys sets override Core values. Unrelated tokens that
/// happen to share a path collide the same way.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    entries: HashMap<DottedPath, String>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from documents in the given order (Core first, then Sys).
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a TokenDocument>) -> Self {
        let mut map = Self::new();
        for doc in docs {
            map.index(doc, None);
        }
        map
    }

    /// Record every leaf of `doc` under `prefix`.
    pub fn index(&mut self, doc: &TokenDocument, prefix: Option<&DottedPath>) {
        doc.walk(prefix, &mut |path, leaf| {
            self.entries.insert(path.clone(), leaf.value.clone());
        });
    }

    pub fn insert(&mut self, path: impl Into<DottedPath>, value: impl Into<String>) {
        self.entries.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, V> FromIterator<(P, V)> for ReferenceMap
where
    P: Into<DottedPath>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, value) in iter {
            map.insert(path, value);
        }
        map
    }
}
