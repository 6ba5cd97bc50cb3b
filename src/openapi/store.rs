//! Ownership of the currently loaded API document and its operation index.
//!
//! The document is loaded once on first use. A reload builds a fresh
//! [`LoadedDocs`] and swaps it in whole; readers holding the previous
//! snapshot keep a consistent view until they drop it.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::openapi::{ApiDocument, DocumentLoader, DocumentSource};
use crate::search::OperationIndex;

/// A loaded document together with the index built from it
#[derive(Debug)]
pub struct LoadedDocs {
    pub document: ApiDocument,
    pub index: OperationIndex,
    pub source: DocumentSource,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDocs {
    pub fn new(document: ApiDocument, source: DocumentSource) -> Self {
        let index = OperationIndex::build(&document);
        Self {
            document,
            index,
            source,
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    loader: DocumentLoader,
    source: DocumentSource,
    current: Arc<RwLock<Option<Arc<LoadedDocs>>>>,
}

impl DocumentStore {
    pub fn new(loader: DocumentLoader, source: DocumentSource) -> Self {
        Self {
            loader,
            source,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// The loaded snapshot, if any
    pub async fn current(&self) -> Option<Arc<LoadedDocs>> {
        self.current.read().await.clone()
    }

    /// Return the loaded snapshot, loading the document on first use
    pub async fn load_if_needed(&self) -> Result<Arc<LoadedDocs>> {
        if let Some(docs) = self.current().await {
            return Ok(docs);
        }

        let mut guard = self.current.write().await;

        // Another caller may have finished loading while we waited
        if let Some(docs) = guard.as_ref() {
            return Ok(docs.clone());
        }

        let docs = self.load().await?;
        *guard = Some(docs.clone());
        Ok(docs)
    }

    /// Load the document again and replace the current snapshot
    pub async fn reload(&self) -> Result<Arc<LoadedDocs>> {
        let docs = self.load().await?;
        *self.current.write().await = Some(docs.clone());
        Ok(docs)
    }

    async fn load(&self) -> Result<Arc<LoadedDocs>> {
        let document = self.loader.load(&self.source).await?;
        let docs = LoadedDocs::new(document, self.source.clone());
        tracing::info!(
            "Loaded API docs from {} ({} operations)",
            self.source,
            docs.index.len()
        );
        Ok(Arc::new(docs))
    }
}
