use anyhow::Result;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::openapi::DocumentStore;
use crate::search::FuzzySearcher;
use crate::search::config::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::search::outputs::{OperationMatch, SearchErrorOutput, SearchOperationsOutput};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchOperationsParams {
    #[schemars(
        description = "Free-text query matched against operation summaries, paths, tags and operation ids. Spacing and punctuation are ignored by the loose match, so '회원 가입' finds '회원가입'"
    )]
    pub query: String,
    #[schemars(description = "Maximum number of results to return (default: 10, max: 500)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SearchTools {
    store: DocumentStore,
    searcher: FuzzySearcher,
}

impl SearchTools {
    pub fn new(store: DocumentStore, searcher: FuzzySearcher) -> Self {
        Self { store, searcher }
    }

    /// Rank the loaded operations against a query
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchOperationsOutput> {
        if limit > MAX_SEARCH_LIMIT {
            return Err(anyhow::anyhow!("Limit must not exceed {MAX_SEARCH_LIMIT}"));
        }

        let docs = self.store.load_if_needed().await?;
        let matches = self.searcher.search(&docs.index, query);
        tracing::debug!("Query {:?} matched {} operations", query, matches.len());

        Ok(SearchOperationsOutput {
            query: query.to_string(),
            total_results: matches.len(),
            results: matches.iter().take(limit).map(OperationMatch::from).collect(),
        })
    }

    /// Perform fuzzy search over the operation index
    pub async fn search_operations(&self, params: SearchOperationsParams) -> String {
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        match self.search(&params.query, limit).await {
            Ok(output) => output.to_json(),
            Err(e) => SearchErrorOutput::new(format!("Search failed: {e:#}")).to_json(),
        }
    }
}
