//! Output types for chat tools
//!
//! These types are used as the return values from chat tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::chat::client::ChatLink;
use crate::chat::error::ChatError;

/// A link together with the text it is shown with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkOutput {
    pub label: String,
    #[serde(flatten)]
    pub link: ChatLink,
}

impl From<ChatLink> for LinkOutput {
    fn from(link: ChatLink) -> Self {
        Self {
            label: link.label(),
            link,
        }
    }
}

/// Output from simple_chat operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SimpleChatOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl SimpleChatOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from session_chat operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionChatOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub links: Vec<LinkOutput>,
    /// False when the reply was replaced because it named unrelated operations
    pub relevant: bool,
}

impl SessionChatOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from get_api_context operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiContextOutput {
    pub context: String,
    pub operations: usize,
    pub max_chars: usize,
}

impl ApiContextOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for chat tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatErrorOutput {
    /// Message meant for the person chatting
    pub error: String,
    /// Underlying failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ChatErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            detail: None,
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}

impl From<ChatError> for ChatErrorOutput {
    fn from(error: ChatError) -> Self {
        Self {
            error: error.user_message(),
            detail: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_output_flattens_link_fields() {
        let output = LinkOutput::from(ChatLink {
            title: None,
            method: Some("GET".to_string()),
            path: Some("/api/v1/users".to_string()),
            url: Some("http://localhost:8080/api/v1/users".to_string()),
        });

        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains(r#""label":"GET /api/v1/users""#));
        assert!(json.contains(r#""path":"/api/v1/users""#));
        assert!(!json.contains("title"));
        let deserialized: LinkOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }

    #[test]
    fn chat_errors_carry_user_message() {
        let output = ChatErrorOutput::from(ChatError::Status(500));
        assert_eq!(
            output.error,
            "Sorry. An AI server error occurred. Please try again shortly."
        );
        assert_eq!(output.detail.as_deref(), Some("status: 500"));

        let json = output.to_json();
        let deserialized: ChatErrorOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, deserialized);
    }
}
