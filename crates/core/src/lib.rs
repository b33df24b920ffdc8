//! Token Studio design tokens in, platform source files out.
//!
//! A [`Loader`] fetches the token-set documents named by a manifest from a
//! [`DocumentSource`], indexes every leaf into a [`ReferenceMap`], and
//! flattens the semantic-layer documents into [`ResolvedToken`]s with all
//! `{path}` references followed. [`TokenStore`] caches the result behind a
//! single-flight load and falls back to [`default_tokens`] when loading
//! fails. [`export::export`] renders the list for iOS, Android, or the web.
//!
//! [`ResolvedToken`]: tokenforge_protocol::ResolvedToken

pub mod classify;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod document;
pub mod export;
pub mod flatten;
pub mod loader;
pub mod manifest;
pub mod reference;
pub mod resolve;
pub mod source;
pub mod store;

pub use classify::{Classifier, ClassifierPolicy};
pub use config::{ConfigError, OutputConfig, PipelineConfig, SourceConfig};
pub use defaults::default_tokens;
pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use document::{DocumentError, TokenDocument, TokenLeaf, TokenNode};
pub use export::{Artifact, ExportError, ExportOptions, Platform};
pub use flatten::Flattener;
pub use loader::{LoadError, Loader};
pub use manifest::{DocumentSpec, Layer, default_manifest};
pub use reference::ReferenceMap;
pub use resolve::{Resolution, Resolver, ResolverPolicy};
pub use source::{BundleSource, DirSource, DocumentSource, HttpSource, MemorySource, SourceError};
pub use store::{Origin, TokenSnapshot, TokenStore};
