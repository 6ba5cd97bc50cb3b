//! # OpenAPI Module
//!
//! API description documents: a permissive view over the JSON, loading from
//! a file or the backend, and the store that owns the loaded document.

pub mod document;
pub mod loader;
pub mod store;

pub use document::ApiDocument;
pub use loader::{DocumentLoader, DocumentSource, build_http_client};
pub use store::{DocumentStore, LoadedDocs};
