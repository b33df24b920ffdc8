use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator between the keys of a dotted token path.
pub const SEPARATOR: char = '.';

/// A `.`-joined key sequence from a token-set root to a token or group,
/// e.g. `color.primary.500`.
///
/// Wraps `Arc<str>`: token names are copied into the reference map, the
/// resolved list, and every emitter's grouping, so `.clone()` is a refcount
/// bump rather than an allocation.
///
/// Implements `Borrow<str>` so maps keyed by `DottedPath` can be queried with
/// the `&str` taken from inside a `{…}` reference.
#[derive(Debug, Clone, Eq)]
pub struct DottedPath(Arc<str>);

impl DottedPath {
    /// Path of `key` beneath `prefix`, or `key` itself at the document root.
    pub fn join(prefix: Option<&DottedPath>, key: &str) -> Self {
        match prefix {
            Some(p) => DottedPath(Arc::from(format!("{}{SEPARATOR}{key}", p.0))),
            None => DottedPath(Arc::from(key)),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Last `n` segments, when the path has more than `n` of them.
    pub fn suffix(&self, n: usize) -> Option<&str> {
        suffix(&self.0, n)
    }
}

/// Last `n` segments of a dotted path string.
///
/// Returns `None` when `n` is zero or the path has `n` segments or fewer,
/// since the "suffix" would then be the path itself.
pub fn suffix(path: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return None;
    }
    path.rmatch_indices(SEPARATOR)
        .nth(n - 1)
        .map(|(idx, _)| &path[idx + SEPARATOR.len_utf8()..])
}

/// The dotted path inside a `{…}` reference, or `None` for a literal.
pub fn reference_target(value: &str) -> Option<&str> {
    value.strip_prefix('{')?.strip_suffix('}')
}

/// Whether a token value is reference-shaped (`{` first, `}` last).
pub fn is_reference(value: &str) -> bool {
    reference_target(value).is_some()
}

impl PartialEq for DottedPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for DottedPath {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for DottedPath {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Ord for DottedPath {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for DottedPath {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for DottedPath {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl std::ops::Deref for DottedPath {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DottedPath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for DottedPath {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DottedPath {
    #[inline]
    fn from(s: &str) -> Self {
        DottedPath(Arc::from(s))
    }
}

impl From<String> for DottedPath {
    #[inline]
    fn from(s: String) -> Self {
        DottedPath(Arc::from(s))
    }
}

impl std::fmt::Display for DottedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled to avoid serde's `rc` feature.

impl Serialize for DottedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DottedPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(DottedPath::from(s))
    }
}
