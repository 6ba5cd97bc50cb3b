use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::chat::{
    ChatClient,
    tools::{ChatTools, GetApiContextParams, SessionChatParams, SimpleChatParams},
};
use crate::config::AssistantConfig;
use crate::docs::tools::{AskDocsParams, DocsTools, GetOperationParams, ListOperationsParams};
use crate::openapi::{DocumentLoader, DocumentStore, build_http_client};
use crate::search::{
    FuzzySearcher,
    tools::{SearchOperationsParams, SearchTools},
};

#[derive(Debug, Clone)]
pub struct ApiDocsService {
    store: DocumentStore,
    docs_tools: DocsTools,
    search_tools: SearchTools,
    chat_tools: ChatTools,
    tool_router: ToolRouter<Self>,
}

impl ApiDocsService {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let http = build_http_client()?;
        let loader = DocumentLoader::new(http.clone(), config.docs_timeout());
        let store = DocumentStore::new(loader, config.document_source());
        let searcher = FuzzySearcher::with_charset(config.loose_charset().clone());
        let client = ChatClient::new(http, &config);
        let config = Arc::new(config);

        Ok(Self {
            docs_tools: DocsTools::new(store.clone(), config.clone()),
            search_tools: SearchTools::new(store.clone(), searcher),
            chat_tools: ChatTools::new(client, store.clone(), config),
            store,
            tool_router: Self::tool_router(),
        })
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

#[tool_router]
impl ApiDocsService {
    // Documentation tools
    #[tool(
        description = "Ask the documentation assistant about the loaded OpenAPI document. Commands: 'path /users' lists the methods of a path, 'method GET' lists every operation using a method, 'paths', 'tags' and 'servers' list the document's top-level entries. Any other text searches operations and renders the top 3 matches. Every answer includes the Swagger UI link."
    )]
    pub async fn ask_docs(&self, params: Parameters<AskDocsParams>) -> String {
        match self.docs_tools.ask_docs(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    #[tool(
        description = "List every operation of the API sorted by summary, as '<summary> — METHOD /path' labels with their positions. Use get_operation with a position to see the operation's details."
    )]
    pub async fn list_operations(&self, params: Parameters<ListOperationsParams>) -> String {
        match self.docs_tools.list_operations(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    #[tool(
        description = "Show the details of one operation by its list_operations position: summary, path, tags, parameters, request body presence and response codes."
    )]
    pub async fn get_operation(&self, params: Parameters<GetOperationParams>) -> String {
        match self.docs_tools.get_operation(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    #[tool(
        description = "Load the OpenAPI document again from its source and rebuild the operation index. Use after the backend's API has changed."
    )]
    pub async fn reload_docs(&self) -> String {
        match self.docs_tools.reload_docs().await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    // Search tools
    #[tool(
        description = "Fuzzy search over the API's operations. Matches summaries, paths, tags and operation ids; spacing and punctuation are ignored so '회원 가입' finds '회원가입'. Returns scored matches, best first."
    )]
    pub async fn search_operations(&self, params: Parameters<SearchOperationsParams>) -> String {
        self.search_tools.search_operations(params.0).await
    }

    // Chat tools
    #[tool(
        description = "Summarize the API as '[METHOD] /path - summary' lines within a character budget (default 3000). This is the context given to the consultation chatbot."
    )]
    pub async fn get_api_context(&self, params: Parameters<GetApiContextParams>) -> String {
        match self.chat_tools.get_api_context(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    #[tool(
        description = "Send one message to the backend's basic chatbot and return its reply. Only one message may be in flight at a time."
    )]
    pub async fn simple_chat(&self, params: Parameters<SimpleChatParams>) -> String {
        match self.chat_tools.simple_chat(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }

    #[tool(
        description = "Ask the backend's API consultation chatbot. The conversation keeps the session id issued with the first reply; pass reset=true to start over. Replies come with links to the operations they mention, or to the Swagger UI."
    )]
    pub async fn session_chat(&self, params: Parameters<SessionChatParams>) -> String {
        match self.chat_tools.session_chat(params.0).await {
            Ok(output) => output.to_json(),
            Err(error) => error.to_json(),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ApiDocsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation::from_build_env(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "MCP server for exploring a backend's OpenAPI documentation and talking to its chatbots. Use ask_docs for quick lookups ('path /users', 'method POST', 'paths', 'tags', 'servers' or free text). Use search_operations for ranked matches and list_operations/get_operation to browse individual operations. Use session_chat for consultation questions; replies link to the operations they mention. Call reload_docs after the backend's API changes.".to_string(),
            ),
            ..Default::default()
        }
    }
}
