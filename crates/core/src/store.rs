use std::sync::{Arc, PoisonError, RwLock};

use tokenforge_protocol::{ResolvedToken, TokenSummary};
use tokio::sync::OnceCell;

use crate::defaults::default_tokens;
use crate::diagnostics::Diagnostics;
use crate::loader::Loader;

/// Where a snapshot's tokens came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Nothing has been loaded yet; the token list is empty.
    Pending,
    Loaded,
    /// The load failed and the built-in defaults were used instead.
    Defaults,
}

/// The outcome of one load: the token list and what was found on the way.
#[derive(Debug, Clone)]
pub struct TokenSnapshot {
    tokens: Vec<ResolvedToken>,
    diagnostics: Diagnostics,
    origin: Origin,
}

impl TokenSnapshot {
    fn pending() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: Diagnostics::new(),
            origin: Origin::Pending,
        }
    }

    pub fn tokens(&self) -> &[ResolvedToken] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_default(&self) -> bool {
        self.origin == Origin::Defaults
    }

    pub fn summaries(&self) -> Vec<TokenSummary> {
        self.tokens.iter().map(TokenSummary::from).collect()
    }
}

type Slot = Arc<OnceCell<Arc<TokenSnapshot>>>;

/// Cache of the resolved token list with single-flight loading.
///
/// The first [`TokenStore::load`] runs the loader; callers arriving while it
/// is in flight wait for the same result, and later callers get the cached
/// snapshot. A failed load is replaced by the built-in defaults, so `load`
/// never fails.
pub struct TokenStore {
    loader: Loader,
    slot: RwLock<Slot>,
}

impl TokenStore {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            slot: RwLock::new(Slot::default()),
        }
    }

    pub async fn load(&self) -> Arc<TokenSnapshot> {
        let slot = self.slot();
        let snapshot = slot.get_or_init(|| self.resolve()).await;
        Arc::clone(snapshot)
    }

    /// The cached snapshot, or an empty [`Origin::Pending`] one when no load
    /// has completed.
    pub fn get(&self) -> Arc<TokenSnapshot> {
        self.slot()
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::new(TokenSnapshot::pending()))
    }

    /// Diagnostics recorded by the last completed load.
    pub fn diagnostics(&self) -> Diagnostics {
        self.get().diagnostics().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot().initialized()
    }

    /// Forget the cached snapshot; the next `load` resolves again. A load
    /// already in flight completes for its own callers only.
    pub fn reset(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Slot::default();
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    fn slot(&self) -> Slot {
        Arc::clone(&self.slot.read().unwrap_or_else(PoisonError::into_inner))
    }

    async fn resolve(&self) -> Arc<TokenSnapshot> {
        let mut diagnostics = Diagnostics::new();
        let snapshot = match self.loader.load(&mut diagnostics).await {
            Ok(tokens) => TokenSnapshot {
                tokens,
                diagnostics,
                origin: Origin::Loaded,
            },
            Err(err) => {
                tracing::warn!(error = %err, "token load failed, serving built-in defaults");
                TokenSnapshot {
                    tokens: default_tokens(),
                    diagnostics,
                    origin: Origin::Defaults,
                }
            }
        };
        Arc::new(snapshot)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("loader", &self.loader)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
