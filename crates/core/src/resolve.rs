use serde::{Deserialize, Serialize};
use tokenforge_protocol::{DottedPath, path, reference_target};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::reference::ReferenceMap;

/// How references are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverPolicy {
    /// On a miss, retry once with only the last `fallback_segments` segments
    /// of the reference. `0` disables the fallback.
    pub fallback_segments: usize,
    /// Maximum number of lookups for one value before the chain is treated
    /// as unresolved.
    pub max_depth: usize,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            fallback_segments: 2,
            max_depth: 32,
        }
    }
}

/// Outcome of following a value's reference chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A literal, either the input itself or the end of its chain.
    Resolved(String),
    Unresolved {
        /// The value to keep: the reference that missed, or the original
        /// input when the hop limit was hit.
        value: String,
        /// Dotted path that could not be resolved.
        path: String,
        depth_exceeded: bool,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: ResolverPolicy,
}

impl Resolver {
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ResolverPolicy {
        self.policy
    }

    /// Fully resolve `value` against `refs`.
    ///
    /// Literals come back unchanged. An unresolvable reference comes back as
    /// written and records exactly one warning naming the missing path.
    pub fn resolve(&self, value: &str, refs: &ReferenceMap, diags: &mut Diagnostics) -> String {
        self.resolve_for(value, refs, None, diags)
    }

    /// [`Resolver::resolve`], attributing any diagnostic to `token`.
    pub fn resolve_for(
        &self,
        value: &str,
        refs: &ReferenceMap,
        token: Option<&DottedPath>,
        diags: &mut Diagnostics,
    ) -> String {
        match self.lookup(value, refs) {
            Resolution::Resolved(resolved) => resolved,
            Resolution::Unresolved {
                value,
                path,
                depth_exceeded,
            } => {
                diags.push(Diagnostic::UnresolvedReference {
                    path,
                    token: token.cloned(),
                    depth_exceeded,
                });
                value
            }
        }
    }

    /// Follow the reference chain without recording diagnostics.
    pub fn lookup(&self, value: &str, refs: &ReferenceMap) -> Resolution {
        let mut current = value;
        for _ in 0..self.policy.max_depth {
            let Some(target) = reference_target(current) else {
                return Resolution::Resolved(current.to_owned());
            };
            match self.find(target, refs) {
                Some(next) => current = next,
                None => {
                    return Resolution::Unresolved {
                        value: current.to_owned(),
                        path: target.to_owned(),
                        depth_exceeded: false,
                    };
                }
            }
        }
        if reference_target(current).is_none() {
            return Resolution::Resolved(current.to_owned());
        }
        Resolution::Unresolved {
            value: value.to_owned(),
            path: reference_target(value).unwrap_or(value).to_owned(),
            depth_exceeded: true,
        }
    }

    /// Exact lookup, then one retry with the trailing segments only.
    fn find<'r>(&self, target: &str, refs: &'r ReferenceMap) -> Option<&'r str> {
        refs.get(target).or_else(|| {
            let simplified = path::suffix(target, self.policy.fallback_segments)?;
            let found = refs.get(simplified)?;
            tracing::debug!(reference = target, fallback = simplified, "resolved via fallback");
            Some(found)
        })
    }
}
