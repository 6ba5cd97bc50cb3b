//! Output types for search tools
//!
//! These types are used as the return values from search tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::search::{HttpMethod, ScoredMatch};

/// Individual search result item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationMatch {
    /// Relevance score
    pub score: f64,
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl From<&ScoredMatch<'_>> for OperationMatch {
    fn from(found: &ScoredMatch<'_>) -> Self {
        let record = found.record;
        Self {
            score: found.score,
            method: record.method,
            path: record.path.clone(),
            summary: record.summary.clone(),
            tags: record.tags.clone(),
            operation_id: record.operation_id().map(str::to_string),
        }
    }
}

/// Output from search_operations operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchOperationsOutput {
    pub query: String,
    /// Number of matches before the limit was applied
    pub total_results: usize,
    pub results: Vec<OperationMatch>,
}

impl SearchOperationsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    /// Check if there are any results
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Error output for search tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchErrorOutput {
    pub error: String,
}

impl SearchErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_operations_output_serialization() {
        let output = SearchOperationsOutput {
            query: "user".to_string(),
            total_results: 1,
            results: vec![OperationMatch {
                score: 4.2,
                method: HttpMethod::Get,
                path: "/api/v1/users".to_string(),
                summary: "List users".to_string(),
                tags: String::new(),
                operation_id: None,
            }],
        };

        let json = output.to_json();
        assert!(json.contains(r#""method":"GET""#));
        assert!(!json.contains("operation_id"));
        let deserialized: SearchOperationsOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
        assert!(deserialized.has_results());
    }

    #[test]
    fn test_search_error_output() {
        let output = SearchErrorOutput::new("Search failed");
        let json = output.to_json();
        let deserialized: SearchErrorOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }
}
