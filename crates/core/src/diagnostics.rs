//! Advisory findings produced while loading, resolving, and exporting tokens.
//!
//! Every diagnostic is collected so callers can inspect it, and mirrored as
//! a `tracing` event at the matching level when it is recorded.

use serde::Serialize;
use tokenforge_protocol::DottedPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A `{path}` reference with no entry in the reference map, even after
    /// fallback simplification, or one whose chain exceeded the hop limit.
    UnresolvedReference {
        path: String,
        token: Option<DottedPath>,
        depth_exceeded: bool,
    },
    /// A document could not be fetched or parsed.
    DocumentLoadFailed { document: String, cause: String },
    /// An optional document does not exist in the content source.
    OptionalDocumentSkipped { document: String },
    /// A token whose value has no representation on an export platform.
    UnexportableToken {
        token: DottedPath,
        platform: String,
        reason: String,
    },
    /// Two tokens map to the same identifier in one exported group; the
    /// first one is kept.
    DuplicateIdentifier {
        token: DottedPath,
        identifier: String,
        platform: String,
    },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Self::OptionalDocumentSkipped { .. } => Level::Info,
            Self::UnresolvedReference { .. }
            | Self::UnexportableToken { .. }
            | Self::DuplicateIdentifier { .. } => Level::Warning,
            Self::DocumentLoadFailed { .. } => Level::Error,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedReference {
                path,
                token,
                depth_exceeded,
            } => {
                write!(f, "unresolved reference {{{path}}}")?;
                if let Some(token) = token {
                    write!(f, " in token {token}")?;
                }
                if *depth_exceeded {
                    write!(f, " (reference chain too deep or cyclic)")?;
                }
                Ok(())
            }
            Self::DocumentLoadFailed { document, cause } => {
                write!(f, "failed to load document \"{document}\": {cause}")
            }
            Self::OptionalDocumentSkipped { document } => {
                write!(f, "optional document \"{document}\" not found, skipping")
            }
            Self::UnexportableToken {
                token,
                platform,
                reason,
            } => write!(f, "{platform}: skipped token {token}: {reason}"),
            Self::DuplicateIdentifier {
                token,
                identifier,
                platform,
            } => write!(
                f,
                "{platform}: token {token} collides with an earlier token as `{identifier}`, \
                 skipped"
            ),
        }
    }
}

/// Ordered collection of diagnostics for one load or export pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a tracing event.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            Level::Info => tracing::info!("{diagnostic}"),
            Level::Warning => tracing::warn!("{diagnostic}"),
            Level::Error => tracing::error!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.iter().filter(|d| d.level() == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }

    /// Paths of every unresolved reference, in the order they were found.
    pub fn unresolved_paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|d| match d {
                Diagnostic::UnresolvedReference { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
