//! HTTP client for the chat backend.
//!
//! Two conversations are supported: the basic chat, which is stateless, and
//! the session chat, where the backend issues a session id with its first
//! reply and the client echoes it on every later message.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::chat::error::ChatError;
use crate::config::AssistantConfig;
use crate::constants::{MAX_CHAT_LINKS, SESSION_CHAT_PATH, SIMPLE_CHAT_PATH};

#[derive(Debug, Serialize)]
struct SimpleChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SimpleChatResponse {
    reply: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionChatRequest<'a> {
    session_id: Option<&'a str>,
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionChatResponse {
    session_id: Option<String>,
    reply: Option<String>,
    links: Option<Vec<ChatLink>>,
}

/// A link offered alongside a session chat reply
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatLink {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

impl ChatLink {
    /// Button text: the title, else `METHOD path`, else the path, else "Open"
    pub fn label(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        let path = self.path.as_deref().unwrap_or_default();
        match self.method.as_deref().filter(|m| !m.is_empty()) {
            Some(method) => format!("{method} {path}"),
            None if !path.is_empty() => path.to_string(),
            None => "Open".to_string(),
        }
    }
}

/// The backend's answer to one session chat message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReply {
    pub reply: Option<String>,
    pub links: Vec<ChatLink>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, config: &AssistantConfig) -> Self {
        Self {
            http,
            base_url: config.base_url().to_string(),
            timeout: config.request_timeout(),
        }
    }

    /// Send one message to the basic chat endpoint
    pub async fn simple_chat(&self, message: &str) -> Result<Option<String>, ChatError> {
        let message = validate_message(message)?;
        let response: SimpleChatResponse = self
            .post_json(SIMPLE_CHAT_PATH, &SimpleChatRequest { message })
            .await?;
        Ok(response.reply)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ChatError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(ChatError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Chat backend {} answered with status {}", url, status);
            return Err(ChatError::Status(status.as_u16()));
        }

        response.json::<R>().await.map_err(ChatError::from_body)
    }
}

/// One session chat conversation.
///
/// Sending borrows the session mutably, so a session has at most one
/// message in flight.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    session_id: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Send `message`, keeping the first session id the backend hands out
    pub async fn send(
        &mut self,
        client: &ChatClient,
        message: &str,
    ) -> Result<SessionReply, ChatError> {
        let message = validate_message(message)?;
        let request = SessionChatRequest {
            session_id: self.session_id.as_deref(),
            message,
        };
        let response: SessionChatResponse = client.post_json(SESSION_CHAT_PATH, &request).await?;

        if self.session_id.is_none()
            && let Some(id) = response.session_id.filter(|id| !id.is_empty())
        {
            tracing::debug!("Chat session started: {}", id);
            self.session_id = Some(id);
        }

        let mut links = response.links.unwrap_or_default();
        links.truncate(MAX_CHAT_LINKS);

        Ok(SessionReply {
            reply: response.reply,
            links,
        })
    }
}

fn validate_message(message: &str) -> Result<&str, ChatError> {
    let message = message.trim();
    if message.is_empty() {
        Err(ChatError::EmptyMessage)
    } else {
        Ok(message)
    }
}
