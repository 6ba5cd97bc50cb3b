//! # Search Module
//!
//! Flattens an API document into a sorted operation index and ranks its
//! operations against free-text queries.
//!
//! ## Key Components
//!
//! - [`indexer`] - operation index built from the document's `paths`
//! - [`fuzzy`] - raw and loose containment scoring
//! - [`tools`] - MCP tool implementations for search operations
//! - [`config`] - scoring weights and the loose-match charset

pub mod config;
pub mod fuzzy;
pub mod indexer;
pub mod outputs;
pub mod tools;

pub use config::{LooseCharset, ScoringWeights};
pub use fuzzy::{FuzzySearcher, ScoredMatch};
pub use indexer::{HttpMethod, OperationIndex, OperationRecord};
pub use tools::SearchTools;
