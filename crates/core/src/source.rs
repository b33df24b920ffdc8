//! Content sources: where named token-set documents are read from.
//!
//! A document name is a `/`-separated set name as Token Studio writes it,
//! e.g. `Sys/Color/Light` or `Sys/Border Radius`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::document::DocumentError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("document not found")]
    NotFound,
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: Url },
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(Url),
    #[error("invalid token bundle: {0}")]
    Bundle(#[from] DocumentError),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// A read-only store of named JSON documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Raw bytes of the named document.
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, SourceError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Token Studio multi-file export on disk: `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::NotFound),
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Documents served over HTTP at `<base>/<name>.json`, each path segment
/// percent-encoded.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base: Url, timeout: Duration) -> Result<Self, SourceError> {
        if base.cannot_be_a_base() {
            return Err(SourceError::InvalidBaseUrl(base));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base, client })
    }

    pub fn url_for(&self, name: &str) -> Result<Url, SourceError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| SourceError::InvalidBaseUrl(self.base.clone()))?;
            segments.pop_if_empty();
            let mut parts = name.split('/').peekable();
            while let Some(part) = parts.next() {
                if parts.peek().is_some() {
                    segments.push(part);
                } else {
                    segments.push(&format!("{part}.json"));
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        let url = self.url_for(name)?;
        tracing::debug!(%url, "fetching token document");
        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(SourceError::NotFound),
            status if status.is_success() => Ok(response.bytes().await?.to_vec()),
            status => Err(SourceError::Status { status, url }),
        }
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

type Sets = HashMap<String, Vec<u8>>;

/// A single-file Token Studio export whose top-level keys are set names.
///
/// The `$themes` and `$metadata` entries are bookkeeping, not token sets, and
/// are never served. A bundle opened from a path is read on the first fetch;
/// a read or parse failure is returned from every fetch until one succeeds.
#[derive(Debug)]
pub struct BundleSource {
    label: String,
    path: Option<PathBuf>,
    sets: OnceCell<Sets>,
}

impl BundleSource {
    pub fn from_slice(label: impl Into<String>, data: &[u8]) -> Result<Self, SourceError> {
        Ok(Self {
            label: label.into(),
            path: None,
            sets: OnceCell::from(parse_bundle(data)?),
        })
    }

    /// A bundle read from `path` on first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            label: path.display().to_string(),
            path: Some(path),
            sets: OnceCell::new(),
        }
    }

    /// Set names, once the bundle has been read.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets
            .get()
            .into_iter()
            .flat_map(|sets| sets.keys().map(String::as_str))
    }

    async fn read(&self) -> Result<Sets, SourceError> {
        let Some(path) = &self.path else {
            return Ok(Sets::new());
        };
        let data = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let sets = parse_bundle(&data)?;
        tracing::debug!(bundle = %path.display(), sets = sets.len(), "read token bundle");
        Ok(sets)
    }
}

fn parse_bundle(data: &[u8]) -> Result<Sets, SourceError> {
    let value: Value = serde_json::from_slice(data).map_err(DocumentError::from)?;
    let object = value.as_object().ok_or(DocumentError::NotAnObject)?;
    Ok(object
        .iter()
        .filter(|(name, _)| !name.starts_with('$'))
        .map(|(name, set)| (name.clone(), set.to_string().into_bytes()))
        .collect())
}

#[async_trait]
impl DocumentSource for BundleSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        let sets = self.sets.get_or_try_init(|| self.read()).await?;
        sets.get(name).cloned().ok_or(SourceError::NotFound)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// In-memory documents. Counts fetches, so callers can check how often a
/// load actually went to the source.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, json: impl Into<Vec<u8>>) -> Self {
        self.insert(name, json);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, json: impl Into<Vec<u8>>) {
        self.documents.insert(name.into(), json.into());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.documents.get(name).cloned().ok_or(SourceError::NotFound)
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }
}
