//! Output types for documentation tools
//!
//! These types are used as the return values from docs tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::docs::render::OperationDetail;

/// Answer to one documentation query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocAnswer {
    /// A command was given without its argument
    MissingArgument { hint: String },
    /// Methods registered under one path, as `METHOD - summary` lines
    Path { path: String, operations: Vec<String> },
    PathNotFound { path: String },
    /// Every operation using one method, as `METHOD /path - summary` lines
    Method {
        method: String,
        total: usize,
        preview: Vec<String>,
        truncated: bool,
    },
    NoMethodMatches { method: String },
    Paths {
        total: usize,
        preview: Vec<String>,
        truncated: bool,
    },
    Tags { tags: Vec<String> },
    Servers { servers: Vec<String> },
    /// Best fuzzy matches for a free-text query
    Operations {
        query: String,
        operations: Vec<OperationDetail>,
    },
    NoMatches { query: String },
}

impl DocAnswer {
    /// Render the answer as chat text
    pub fn to_text(&self) -> String {
        match self {
            DocAnswer::MissingArgument { hint } => hint.clone(),
            DocAnswer::Path { path, operations } => {
                let mut lines = vec![format!("Path: {path}")];
                lines.extend(operations.iter().cloned());
                lines.join("\n")
            }
            DocAnswer::PathNotFound { path } => format!("Path not found: {path}"),
            DocAnswer::Method {
                total,
                preview,
                truncated,
                ..
            } => with_preview(format!("{total} results"), preview, *truncated),
            DocAnswer::NoMethodMatches { method } => {
                format!("No paths use the {} method.", method.to_uppercase())
            }
            DocAnswer::Paths {
                total,
                preview,
                truncated,
            } => with_preview(format!("{total} paths"), preview, *truncated),
            DocAnswer::Tags { tags } if tags.is_empty() => "No tag information.".to_string(),
            DocAnswer::Tags { tags } => format!("Tags: {}", tags.join(", ")),
            DocAnswer::Servers { servers } if servers.is_empty() => {
                "No server information.".to_string()
            }
            DocAnswer::Servers { servers } => format!("Servers: {}", servers.join("\n")),
            DocAnswer::Operations { operations, .. } => operations
                .iter()
                .map(OperationDetail::to_text)
                .collect::<Vec<_>>()
                .join("\n\n"),
            DocAnswer::NoMatches { .. } => {
                r#"No related API found. Try "path /users" or "method GET"."#.to_string()
            }
        }
    }
}

fn with_preview(header: String, preview: &[String], truncated: bool) -> String {
    let mut text = header;
    for line in preview {
        text.push('\n');
        text.push_str(line);
    }
    if truncated {
        text.push_str("\n…");
    }
    text
}

/// Output from ask_docs operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AskDocsOutput {
    pub query: String,
    pub answer: DocAnswer,
    pub text: String,
    pub swagger_ui_url: String,
}

impl AskDocsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// One entry of the operation picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationOption {
    pub position: usize,
    pub label: String,
}

/// Output from list_operations operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListOperationsOutput {
    pub openapi_version: Option<String>,
    pub total: usize,
    pub operations: Vec<OperationOption>,
}

impl ListOperationsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from get_operation operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetOperationOutput {
    pub position: usize,
    pub operation: OperationDetail,
    pub text: String,
    pub swagger_ui_url: String,
}

impl GetOperationOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from reload_docs operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReloadDocsOutput {
    pub source: String,
    pub openapi_version: Option<String>,
    pub operations: usize,
    pub loaded_at: String,
}

impl ReloadDocsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for docs tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DocsErrorOutput {
    pub error: String,
}

impl DocsErrorOutput {
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
    fn preview_answers_mark_truncation() {
        let answer = DocAnswer::Paths {
            total: 3,
            preview: vec!["/a".to_string(), "/b".to_string()],
            truncated: true,
        };
        assert_eq!(answer.to_text(), "3 paths\n/a\n/b\n…");

        let answer = DocAnswer::Method {
            method: "get".to_string(),
            total: 1,
            preview: vec!["GET /a - A".to_string()],
            truncated: false,
        };
        assert_eq!(answer.to_text(), "1 results\nGET /a - A");
    }

    #[test]
    fn empty_listings_have_fallback_text() {
        assert_eq!(DocAnswer::Tags { tags: vec![] }.to_text(), "No tag information.");
        assert_eq!(
            DocAnswer::Servers { servers: vec![] }.to_text(),
            "No server information."
        );
        assert_eq!(
            DocAnswer::NoMethodMatches {
                method: "patch".to_string()
            }
            .to_text(),
            "No paths use the PATCH method."
        );
    }

    #[test]
    fn ask_docs_output_serialization() {
        let output = AskDocsOutput {
            query: "tags".to_string(),
            answer: DocAnswer::Tags {
                tags: vec!["User".to_string()],
            },
            text: "Tags: User".to_string(),
            swagger_ui_url: "http://localhost:8080/swagger-ui/index.html".to_string(),
        };

        let json = output.to_json();
        assert!(json.contains(r#""kind":"tags""#));
        let deserialized: AskDocsOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }

    #[test]
    fn test_docs_error_output() {
        let output = DocsErrorOutput::new("Docs failed");
        let json = output.to_json();
        let deserialized: DocsErrorOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }
}
