use std::sync::Arc;
use tokio::sync::Mutex;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chat::{
    ChatClient, ChatError, ChatSession,
    outputs::{ApiContextOutput, ChatErrorOutput, LinkOutput, SessionChatOutput, SimpleChatOutput},
    reply::{
        NOT_FOUND_REPLY, build_context, is_reply_relevant, links_for_reply,
        remove_duplicate_lines, swagger_link,
    },
};
use crate::config::AssistantConfig;
use crate::constants::{MAX_CHAT_LINKS, MAX_CONTEXT_CHARS};
use crate::openapi::DocumentStore;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SimpleChatParams {
    #[schemars(description = "The message to send to the basic chatbot")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SessionChatParams {
    #[schemars(
        description = "The question for the API consultation chatbot (e.g., 'How do I sign up a member?')"
    )]
    pub message: String,
    #[schemars(description = "Start a new conversation instead of continuing the current one")]
    pub reset: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetApiContextParams {
    #[schemars(description = "Maximum context length in characters (default: 3000)")]
    pub max_chars: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ChatTools {
    client: ChatClient,
    store: DocumentStore,
    config: Arc<AssistantConfig>,
    simple: Arc<Mutex<()>>,
    session: Arc<Mutex<ChatSession>>,
}

impl ChatTools {
    pub fn new(client: ChatClient, store: DocumentStore, config: Arc<AssistantConfig>) -> Self {
        Self {
            client,
            store,
            config,
            simple: Arc::new(Mutex::new(())),
            session: Arc::new(Mutex::new(ChatSession::new())),
        }
    }

    pub async fn simple_chat(
        &self,
        params: SimpleChatParams,
    ) -> Result<SimpleChatOutput, ChatErrorOutput> {
        let _in_flight = self.simple.try_lock().map_err(|_| ChatError::Busy)?;
        match self.client.simple_chat(&params.message).await {
            Ok(reply) => Ok(SimpleChatOutput { reply }),
            Err(e) => {
                tracing::error!("Simple chat failed: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn session_chat(
        &self,
        params: SessionChatParams,
    ) -> Result<SessionChatOutput, ChatErrorOutput> {
        let mut session = self.session.try_lock().map_err(|_| ChatError::Busy)?;
        if params.reset.unwrap_or(false) {
            *session = ChatSession::new();
        }

        let answer = match session.send(&self.client, &params.message).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Session chat failed: {}", e);
                return Err(e.into());
            }
        };
        let session_id = session.session_id().map(str::to_string);
        drop(session);

        let mut reply = answer.reply.map(|text| remove_duplicate_lines(&text));
        let mut links = answer.links;
        let mut relevant = true;

        match self.store.load_if_needed().await {
            Ok(docs) => {
                if let Some(text) = reply.as_deref() {
                    relevant = is_reply_relevant(&params.message, text, &docs.index);
                }
                if !relevant {
                    reply = Some(NOT_FOUND_REPLY.to_string());
                    links.clear();
                } else if links.is_empty() {
                    if let Some(text) = reply.as_deref() {
                        links = links_for_reply(
                            text,
                            &docs.index,
                            self.config.base_url(),
                            MAX_CHAT_LINKS,
                        );
                    }
                }
            }
            Err(e) => tracing::warn!("Skipping reply checks, API docs unavailable: {:#}", e),
        }

        if links.is_empty() {
            links.push(swagger_link(self.config.swagger_ui_url()));
        }

        Ok(SessionChatOutput {
            session_id,
            reply,
            links: links.into_iter().map(LinkOutput::from).collect(),
            relevant,
        })
    }

    pub async fn get_api_context(
        &self,
        params: GetApiContextParams,
    ) -> Result<ApiContextOutput, ChatErrorOutput> {
        let docs = self.store.load_if_needed().await.map_err(|e| ChatErrorOutput {
            error: "Sorry. No API documentation is currently available.".to_string(),
            detail: Some(format!("{e:#}")),
        })?;

        let max_chars = params.max_chars.unwrap_or(MAX_CONTEXT_CHARS);
        Ok(ApiContextOutput {
            context: build_context(&docs.index, max_chars),
            operations: docs.index.len(),
            max_chars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{DocumentLoader, build_http_client};
    use std::time::Duration;

    fn tools_for(docs: &std::path::Path) -> ChatTools {
        let config = AssistantConfig::new("http://127.0.0.1:9")
            .with_docs_file(Some(docs.to_path_buf()))
            .with_request_timeout(Duration::from_secs(1));
        let http = build_http_client().unwrap();
        let loader = DocumentLoader::new(http.clone(), config.docs_timeout());
        let store = DocumentStore::new(loader, config.document_source());
        ChatTools::new(ChatClient::new(http, &config), store, Arc::new(config))
    }

    #[tokio::test]
    async fn api_context_uses_loaded_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-docs.json");
        std::fs::write(
            &path,
            r#"{"paths":{"/api/v1/users":{"get":{"summary":"List users"}}}}"#,
        )
        .unwrap();

        let output = tools_for(&path)
            .get_api_context(GetApiContextParams { max_chars: None })
            .await
            .unwrap();
        assert_eq!(output.context, "[GET] /api/v1/users - List users");
        assert_eq!(output.operations, 1);
        assert_eq!(output.max_chars, MAX_CONTEXT_CHARS);
    }

    #[tokio::test]
    async fn second_concurrent_session_message_is_busy() {
        let dir = tempfile::tempdir().unwrap();
        let tools = tools_for(&dir.path().join("missing.json"));

        let _held = tools.session.lock().await;
        let error = tools
            .session_chat(SessionChatParams {
                message: "hello".to_string(),
                reset: None,
            })
            .await
            .unwrap_err();
        assert_eq!(error.error, ChatError::Busy.user_message());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tools = tools_for(&dir.path().join("missing.json"));

        let error = tools
            .simple_chat(SimpleChatParams {
                message: " ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.detail.as_deref(), Some("message is empty"));
    }
}
