//! Pipeline configuration, read from YAML.
//!
//! ```yaml
//! source:
//!   kind: http
//!   base_url: https://tokens.example.com/export/
//!   timeout_secs: 5
//! resolver:
//!   fallback_segments: 2
//! classifier:
//!   dimension_as: dimension
//! output:
//!   dir: build/tokens
//!   platforms: [ios, android]
//! ```
//!
//! Every section is optional.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{Classifier, ClassifierPolicy};
use crate::export::{ExportOptions, Platform};
use crate::flatten::Flattener;
use crate::loader::Loader;
use crate::manifest::{DocumentSpec, default_manifest};
use crate::resolve::{Resolver, ResolverPolicy};
use crate::source::{BundleSource, DirSource, DocumentSource, HttpSource, SourceError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cannot open token source: {0}")]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Multi-file export directory.
    Dir { path: PathBuf },
    Http {
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// Single-file export.
    Bundle { path: PathBuf },
}

fn default_timeout_secs() -> u64 {
    HttpSource::DEFAULT_TIMEOUT.as_secs()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Dir {
            path: PathBuf::from("tokens"),
        }
    }
}

impl SourceConfig {
    pub async fn open(&self) -> Result<Arc<dyn DocumentSource>, SourceError> {
        let source: Arc<dyn DocumentSource> = match self {
            Self::Dir { path } => Arc::new(DirSource::new(path)),
            Self::Http {
                base_url,
                timeout_secs,
            } => {
                let base = Url::parse(base_url).map_err(|e| SourceError::InvalidUrl {
                    url: base_url.clone(),
                    reason: e.to_string(),
                })?;
                Arc::new(HttpSource::new(base, Duration::from_secs(*timeout_secs))?)
            }
            Self::Bundle { path } => Arc::new(BundleSource::open(path)),
        };
        Ok(source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub platforms: Vec<Platform>,
    #[serde(flatten)]
    pub options: ExportOptions,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build/tokens"),
            platforms: vec![Platform::Ios, Platform::Android, Platform::Web],
            options: ExportOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub documents: Vec<DocumentSpec>,
    pub resolver: ResolverPolicy,
    pub classifier: ClassifierPolicy,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            documents: default_manifest(),
            resolver: ResolverPolicy::default(),
            classifier: ClassifierPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn flattener(&self) -> Flattener {
        Flattener::new(
            Resolver::new(self.resolver),
            Classifier::new(self.classifier),
        )
    }

    /// A loader over the configured source, manifest and policies.
    pub async fn loader(&self) -> Result<Loader, ConfigError> {
        let source = self.source.open().await?;
        Ok(Loader::new(source)
            .with_manifest(self.documents.clone())
            .with_flattener(self.flattener()))
    }
}
