//! Loading API documents from disk or from the backend's `/v3/api-docs`

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::openapi::ApiDocument;

/// Where an API document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => f.write_str(url),
        }
    }
}

/// Build the HTTP client shared by the loader and the chat client
pub fn build_http_client() -> Result<reqwest::Client> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    tracing::debug!("Creating HTTP client with User-Agent: {}", user_agent);

    reqwest::Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("Failed to create HTTP client")
}

/// Fetches and parses API documents
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl DocumentLoader {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn load(&self, source: &DocumentSource) -> Result<ApiDocument> {
        match source {
            DocumentSource::File(path) => self.load_file(path).await,
            DocumentSource::Url(url) => self.fetch(url).await,
        }
    }

    async fn load_file(&self, path: &Path) -> Result<ApiDocument> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read API docs from {}", path.display()))?;

        ApiDocument::from_json_str(&text)
            .with_context(|| format!("Failed to parse API docs in {}", path.display()))
    }

    async fn fetch(&self, url: &str) -> Result<ApiDocument> {
        tracing::info!("Fetching API docs from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Failed to request API docs from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "Failed to load OpenAPI docs from {url}, status: {}",
                status.as_u16()
            );
        }

        let value: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to decode API docs from {url}"))?;

        Ok(ApiDocument::from_value(value))
    }
}
