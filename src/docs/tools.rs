use std::sync::Arc;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::docs::{
    DocCommand, DocQuery,
    outputs::{
        AskDocsOutput, DocAnswer, DocsErrorOutput, GetOperationOutput, ListOperationsOutput,
        OperationOption, ReloadDocsOutput,
    },
    render::OperationDetail,
};
use crate::openapi::DocumentStore;
use crate::search::FuzzySearcher;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AskDocsParams {
    #[schemars(
        description = "A documentation query: 'path /users', 'method GET', 'paths', 'tags', 'servers', or free text to search operations (e.g., 'sign up', '회원 가입')"
    )]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListOperationsParams {
    #[schemars(description = "Maximum number of operations to return (default: all)")]
    pub limit: Option<usize>,
    #[schemars(description = "Starting position for pagination (default: 0)")]
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetOperationParams {
    #[schemars(description = "Position of the operation as returned by list_operations")]
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct DocsTools {
    store: DocumentStore,
    searcher: FuzzySearcher,
    config: Arc<AssistantConfig>,
}

impl DocsTools {
    pub fn new(store: DocumentStore, config: Arc<AssistantConfig>) -> Self {
        Self {
            store,
            searcher: FuzzySearcher::with_charset(config.loose_charset().clone()),
            config,
        }
    }

    pub async fn ask_docs(&self, params: AskDocsParams) -> Result<AskDocsOutput, DocsErrorOutput> {
        let Some(command) = DocCommand::parse(&params.query) else {
            return Err(DocsErrorOutput::new("Query must not be empty"));
        };

        let docs = self
            .store
            .load_if_needed()
            .await
            .map_err(|e| DocsErrorOutput::new(format!("Failed to load API docs: {e:#}")))?;

        let answer = DocQuery::new(&docs.document, &docs.index, &self.searcher).answer(&command);
        tracing::debug!("Answered docs query {:?}", params.query);

        Ok(AskDocsOutput {
            query: params.query,
            text: answer.to_text(),
            answer,
            swagger_ui_url: self.config.swagger_ui_url(),
        })
    }

    pub async fn list_operations(
        &self,
        params: ListOperationsParams,
    ) -> Result<ListOperationsOutput, DocsErrorOutput> {
        let docs = self
            .store
            .load_if_needed()
            .await
            .map_err(|e| DocsErrorOutput::new(format!("Failed to load API docs: {e:#}")))?;

        let offset = params.offset.unwrap_or(0);
        let limit = params.limit.unwrap_or(usize::MAX);

        let operations = docs
            .index
            .iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(position, record)| OperationOption {
                position,
                label: record.display_label(),
            })
            .collect();

        Ok(ListOperationsOutput {
            openapi_version: docs.document.openapi_version().map(str::to_string),
            total: docs.index.len(),
            operations,
        })
    }

    pub async fn get_operation(
        &self,
        params: GetOperationParams,
    ) -> Result<GetOperationOutput, DocsErrorOutput> {
        let docs = self
            .store
            .load_if_needed()
            .await
            .map_err(|e| DocsErrorOutput::new(format!("Failed to load API docs: {e:#}")))?;

        let record = docs.index.get(params.position).ok_or_else(|| {
            DocsErrorOutput::new(format!(
                "No operation at position {} ({} operations loaded)",
                params.position,
                docs.index.len()
            ))
        })?;

        let operation = OperationDetail::from_record(record);
        Ok(GetOperationOutput {
            position: params.position,
            text: operation.to_text(),
            operation,
            swagger_ui_url: self.config.swagger_ui_url(),
        })
    }

    pub async fn reload_docs(&self) -> Result<ReloadDocsOutput, DocsErrorOutput> {
        match self.store.reload().await {
            Ok(docs) => Ok(ReloadDocsOutput {
                source: docs.source.to_string(),
                openapi_version: docs.document.openapi_version().map(str::to_string),
                operations: docs.index.len(),
                loaded_at: docs.loaded_at.to_rfc3339(),
            }),
            Err(e) => {
                tracing::warn!("Reloading API docs from {} failed: {:#}", self.store.source(), e);
                Err(DocsErrorOutput::new(format!("Failed to reload API docs: {e:#}")))
            }
        }
    }

    /// Answer a query without going through the MCP layer
    pub async fn answer(&self, query: &str) -> anyhow::Result<DocAnswer> {
        let command = DocCommand::parse(query)
            .ok_or_else(|| anyhow::anyhow!("Query must not be empty"))?;
        let docs = self.store.load_if_needed().await?;
        Ok(DocQuery::new(&docs.document, &docs.index, &self.searcher).answer(&command))
    }
}
