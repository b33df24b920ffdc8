use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokenforge_protocol::ResolvedToken;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::TokenDocument;
use crate::flatten::Flattener;
use crate::manifest::{DocumentSpec, Layer, default_manifest};
use crate::reference::ReferenceMap;
use crate::source::{DocumentSource, SourceError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("required documents unavailable: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Fetches a manifest of documents and resolves them into a token list.
pub struct Loader {
    source: Arc<dyn DocumentSource>,
    manifest: Vec<DocumentSpec>,
    flattener: Flattener,
}

impl Loader {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            manifest: default_manifest(),
            flattener: Flattener::default(),
        }
    }

    pub fn with_manifest(mut self, manifest: Vec<DocumentSpec>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_flattener(mut self, flattener: Flattener) -> Self {
        self.flattener = flattener;
        self
    }

    pub fn manifest(&self) -> &[DocumentSpec] {
        &self.manifest
    }

    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    /// Fetch every document, index all of them, then flatten the Sys sets.
    ///
    /// Fetches run concurrently; resolution starts only once every document
    /// is in memory and the reference map is complete. A missing optional
    /// document contributes nothing. Any failed required document aborts the
    /// load after each failure has been reported.
    pub async fn load(&self, diags: &mut Diagnostics) -> Result<Vec<ResolvedToken>, LoadError> {
        tracing::debug!(
            source = %self.source.describe(),
            documents = self.manifest.len(),
            "fetching token documents"
        );
        let fetched = join_all(self.manifest.iter().map(|spec| async move {
            let result = self.source.fetch(&spec.name).await;
            (spec, result)
        }))
        .await;

        let mut documents: Vec<(&DocumentSpec, TokenDocument)> = Vec::with_capacity(fetched.len());
        let mut missing = Vec::new();
        for (spec, result) in fetched {
            let parsed = match result {
                Ok(bytes) => TokenDocument::from_slice(&bytes).map_err(|e| e.to_string()),
                Err(SourceError::NotFound) if !spec.required => {
                    diags.push(Diagnostic::OptionalDocumentSkipped {
                        document: spec.name.clone(),
                    });
                    continue;
                }
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(doc) => {
                    tracing::debug!(document = %spec.name, tokens = doc.leaf_count(), "parsed");
                    documents.push((spec, doc));
                }
                Err(cause) => {
                    diags.push(Diagnostic::DocumentLoadFailed {
                        document: spec.name.clone(),
                        cause,
                    });
                    if spec.required {
                        missing.push(spec.name.clone());
                    }
                }
            }
        }
        if !missing.is_empty() {
            return Err(LoadError::MissingRequired(missing));
        }

        let in_layer = |layer: Layer| {
            documents
                .iter()
                .filter(move |(spec, _)| spec.layer == layer)
        };
        let refs = ReferenceMap::from_documents(
            in_layer(Layer::Core)
                .chain(in_layer(Layer::Sys))
                .map(|(_, doc)| doc),
        );

        let mut tokens = Vec::new();
        for (spec, doc) in in_layer(Layer::Sys) {
            tokens.extend(
                self.flattener
                    .flatten(doc, &spec.category(), &refs, spec.mode, diags),
            );
        }
        tracing::info!(
            tokens = tokens.len(),
            references = refs.len(),
            unresolved = diags.unresolved_paths().len(),
            "resolved token list"
        );
        Ok(tokens)
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("source", &self.source.describe())
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}
