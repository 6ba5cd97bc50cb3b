//! Runtime configuration shared by the document loader, the chat client and
//! the MCP service.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    API_DOCS_PATH, DEFAULT_BASE_URL, DEFAULT_DOCS_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    SWAGGER_UI_PATH,
};
use crate::openapi::DocumentSource;
use crate::search::LooseCharset;

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    base_url: String,
    docs_file: Option<PathBuf>,
    request_timeout: Duration,
    docs_timeout: Duration,
    loose_charset: LooseCharset,
}

impl AssistantConfig {
    /// Create a configuration for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            docs_file: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            docs_timeout: Duration::from_secs(DEFAULT_DOCS_TIMEOUT_SECS),
            loose_charset: LooseCharset::default(),
        }
    }

    /// Read the API document from a local file instead of the backend
    pub fn with_docs_file(mut self, docs_file: Option<PathBuf>) -> Self {
        self.docs_file = docs_file;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_docs_timeout(mut self, timeout: Duration) -> Self {
        self.docs_timeout = timeout;
        self
    }

    pub fn with_loose_charset(mut self, charset: LooseCharset) -> Self {
        self.loose_charset = charset;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn docs_timeout(&self) -> Duration {
        self.docs_timeout
    }

    pub fn loose_charset(&self) -> &LooseCharset {
        &self.loose_charset
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn swagger_ui_url(&self) -> String {
        self.url(SWAGGER_UI_PATH)
    }

    /// Where the API document is loaded from
    pub fn document_source(&self) -> DocumentSource {
        match &self.docs_file {
            Some(path) => DocumentSource::File(path.clone()),
            None => DocumentSource::Url(self.url(API_DOCS_PATH)),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = AssistantConfig::new("http://example.com/ ");
        assert_eq!(config.base_url(), "http://example.com");
        assert_eq!(
            config.swagger_ui_url(),
            "http://example.com/swagger-ui/index.html"
        );
    }

    #[test]
    fn document_source_prefers_local_file() {
        let config = AssistantConfig::default();
        assert_eq!(
            config.document_source(),
            DocumentSource::Url("http://localhost:8080/v3/api-docs".to_string())
        );

        let config = config.with_docs_file(Some(PathBuf::from("/tmp/api-docs.json")));
        assert_eq!(
            config.document_source(),
            DocumentSource::File(PathBuf::from("/tmp/api-docs.json"))
        );
    }

    #[test]
    fn default_timeouts() {
        let config = AssistantConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(35));
        assert_eq!(config.docs_timeout(), Duration::from_secs(20));
    }
}
