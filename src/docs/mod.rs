//! # Docs Module
//!
//! Answers documentation questions about the loaded API document: the
//! `path`/`method`/`paths`/`tags`/`servers` command language, free-text
//! lookups through the fuzzy search, and plain-text rendering of single
//! operations.

pub mod outputs;
pub mod query;
pub mod render;
pub mod tools;

pub use query::{DocCommand, DocQuery};
pub use render::{OperationDetail, ParameterInfo};
pub use tools::DocsTools;
