use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use api_docs_assistant::chat::ChatClient;
use api_docs_assistant::chat::outputs::ChatErrorOutput;
use api_docs_assistant::chat::tools::{ChatTools, SessionChatParams, SimpleChatParams};
use api_docs_assistant::config::AssistantConfig;
use api_docs_assistant::constants::{
    DEFAULT_BASE_URL, DEFAULT_DOCS_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use api_docs_assistant::docs::DocsTools;
use api_docs_assistant::openapi::{DocumentLoader, DocumentStore, build_http_client};
use api_docs_assistant::search::config::{DEFAULT_LOOSE_CHARSET, DEFAULT_SEARCH_LIMIT};
use api_docs_assistant::search::{FuzzySearcher, LooseCharset, SearchTools};
use api_docs_assistant::service::ApiDocsService;

/// MCP server and CLI for exploring a backend's OpenAPI documentation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the backend serving /v3/api-docs and the chat endpoints
    #[arg(long, env = "API_DOCS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read the OpenAPI document from this file instead of the backend
    #[arg(long, env = "API_DOCS_FILE")]
    docs_file: Option<PathBuf>,

    /// Timeout for chat requests, in seconds
    #[arg(long, env = "API_DOCS_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    /// Timeout for loading the OpenAPI document, in seconds
    #[arg(long, env = "API_DOCS_LOAD_TIMEOUT_SECS", default_value_t = DEFAULT_DOCS_TIMEOUT_SECS)]
    load_timeout_secs: u64,

    /// Characters kept by whitespace- and punctuation-insensitive matching,
    /// besides ASCII letters, digits and `_/.-`: comma-separated code points
    /// or ranges (e.g. "U+AC00-U+D7A3,U+3040-U+309F"), or "none"
    #[arg(long, env = "API_DOCS_LOOSE_CHARSET", default_value = DEFAULT_LOOSE_CHARSET)]
    loose_charset: LooseCharset,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one documentation query ("path /users", "method GET", "paths", "tags", "servers" or free text)
    Query {
        /// The query text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print operations ranked against a free-text query
    Search {
        /// The query text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Send one message to the chat backend
    Chat {
        /// The message to send
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Use the basic chat instead of the session chat
        #[arg(long)]
        simple: bool,
    },
}

impl Args {
    fn config(&self) -> AssistantConfig {
        AssistantConfig::new(self.base_url.as_str())
            .with_docs_file(self.docs_file.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_docs_timeout(Duration::from_secs(self.load_timeout_secs))
            .with_loose_charset(self.loose_charset.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = args.config();

    // Handle subcommands
    if let Some(command) = args.command {
        return handle_command(command, config).await;
    }

    tracing::info!("Starting API docs assistant MCP server on stdio...");
    tracing::info!("API docs source: {}", config.document_source());
    tracing::info!("Loose-match charset: {}", config.loose_charset());

    let api_docs_service = ApiDocsService::new(config)?;

    // Serve using stdio transport
    let service = api_docs_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;
    Ok(())
}

async fn handle_command(command: Commands, config: AssistantConfig) -> Result<()> {
    let http = build_http_client()?;
    let loader = DocumentLoader::new(http.clone(), config.docs_timeout());
    let store = DocumentStore::new(loader, config.document_source());

    match command {
        Commands::Query { text } => {
            let swagger_ui_url = config.swagger_ui_url();
            let tools = DocsTools::new(store, Arc::new(config));
            let answer = tools.answer(&text.join(" ")).await?;
            println!("{}", answer.to_text());
            println!("\nSwagger UI: {swagger_ui_url}");
        }
        Commands::Search { text, limit } => {
            let searcher = FuzzySearcher::with_charset(config.loose_charset().clone());
            let tools = SearchTools::new(store, searcher);
            let output = tools.search(&text.join(" "), limit).await?;
            if !output.has_results() {
                println!("No matching operations.");
            }
            for found in &output.results {
                println!(
                    "{:>7.3}  {} {} - {}",
                    found.score, found.method, found.path, found.summary
                );
            }
        }
        Commands::Chat { message, simple } => {
            let client = ChatClient::new(http, &config);
            let tools = ChatTools::new(client, store, Arc::new(config));
            let message = message.join(" ");
            if simple {
                let output = tools
                    .simple_chat(SimpleChatParams { message })
                    .await
                    .map_err(chat_failure)?;
                println!("{}", output.reply.unwrap_or_default());
            } else {
                let output = tools
                    .session_chat(SessionChatParams {
                        message,
                        reset: None,
                    })
                    .await
                    .map_err(chat_failure)?;
                println!("{}", output.reply.unwrap_or_default());
                for link in &output.links {
                    println!(
                        "- {}: {}",
                        link.label,
                        link.link.url.as_deref().unwrap_or("-")
                    );
                }
            }
        }
    }

    Ok(())
}

fn chat_failure(error: ChatErrorOutput) -> anyhow::Error {
    match error.detail {
        Some(detail) => anyhow!("{} ({detail})", error.error),
        None => anyhow!("{}", error.error),
    }
}
