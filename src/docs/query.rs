//! Documentation query language.
//!
//! The assistant understands a handful of commands:
//!
//! - `path /users` lists the methods registered under a path
//! - `method GET` lists every path using a method
//! - `paths`, `tags`, `servers` list the document's top-level entries
//!
//! Anything else is treated as a free-text search over the operation index.

use serde_json::Value;

use crate::constants::{METHOD_PREVIEW_LIMIT, PATHS_PREVIEW_LIMIT};
use crate::docs::outputs::DocAnswer;
use crate::docs::render::OperationDetail;
use crate::openapi::ApiDocument;
use crate::openapi::document::operation_summary;
use crate::search::config::DEFAULT_RENDERED_MATCHES;
use crate::search::{FuzzySearcher, HttpMethod, OperationIndex};

const PATH_PREFIX: &str = "path ";
const METHOD_PREFIX: &str = "method ";

/// A parsed documentation query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocCommand {
    Path(String),
    Method(String),
    ListPaths,
    ListTags,
    ListServers,
    Search(String),
}

impl DocCommand {
    /// Parse user input; `None` when the input is blank
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(rest) = strip_prefix_ignore_case(text, PATH_PREFIX) {
            return Some(DocCommand::Path(rest.trim().to_string()));
        }
        if let Some(rest) = strip_prefix_ignore_case(text, METHOD_PREFIX) {
            return Some(DocCommand::Method(rest.trim().to_string()));
        }

        let command = match text.to_lowercase().as_str() {
            "paths" => DocCommand::ListPaths,
            "tags" => DocCommand::ListTags,
            "servers" => DocCommand::ListServers,
            _ => DocCommand::Search(text.to_string()),
        };
        Some(command)
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Answers [`DocCommand`]s against one loaded document
#[derive(Debug, Clone, Copy)]
pub struct DocQuery<'a> {
    document: &'a ApiDocument,
    index: &'a OperationIndex,
    searcher: &'a FuzzySearcher,
}

impl<'a> DocQuery<'a> {
    pub fn new(
        document: &'a ApiDocument,
        index: &'a OperationIndex,
        searcher: &'a FuzzySearcher,
    ) -> Self {
        Self {
            document,
            index,
            searcher,
        }
    }

    pub fn answer(&self, command: &DocCommand) -> DocAnswer {
        match command {
            DocCommand::Path(path) => self.describe_path(path),
            DocCommand::Method(method) => self.list_by_method(method),
            DocCommand::ListPaths => self.list_paths(),
            DocCommand::ListTags => DocAnswer::Tags {
                tags: self.document.tag_names(),
            },
            DocCommand::ListServers => DocAnswer::Servers {
                servers: self.document.server_urls(),
            },
            DocCommand::Search(query) => self.search(query),
        }
    }

    /// Methods registered under `path`, in document order
    pub fn describe_path(&self, path: &str) -> DocAnswer {
        if path.is_empty() {
            return DocAnswer::MissingArgument {
                hint: "Enter a path to look up, e.g. path /users".to_string(),
            };
        }

        let Some(item) = self.document.path_item(path) else {
            return DocAnswer::PathNotFound {
                path: path.to_string(),
            };
        };

        let operations = item
            .iter()
            .filter_map(|(key, operation)| {
                let method = HttpMethod::from_key(key)?;
                Some(summary_line(&method.to_string(), operation))
            })
            .collect();

        DocAnswer::Path {
            path: path.to_string(),
            operations,
        }
    }

    /// Every (path, key) pair whose key equals `method`, ignoring case
    pub fn list_by_method(&self, method: &str) -> DocAnswer {
        if method.is_empty() {
            return DocAnswer::MissingArgument {
                hint: "Enter a method, e.g. method GET".to_string(),
            };
        }

        let mut matched = Vec::new();
        if let Some(paths) = self.document.paths() {
            for (path, item) in paths {
                let Some(item) = item.as_object() else {
                    continue;
                };
                for (key, operation) in item {
                    if key.eq_ignore_ascii_case(method) {
                        let endpoint = format!("{} {}", key.to_uppercase(), path);
                        matched.push(summary_line(&endpoint, operation));
                    }
                }
            }
        }

        if matched.is_empty() {
            return DocAnswer::NoMethodMatches {
                method: method.to_string(),
            };
        }

        let total = matched.len();
        matched.truncate(METHOD_PREVIEW_LIMIT);
        DocAnswer::Method {
            method: method.to_uppercase(),
            total,
            preview: matched,
            truncated: total > METHOD_PREVIEW_LIMIT,
        }
    }

    pub fn list_paths(&self) -> DocAnswer {
        let paths = self.document.path_keys();
        let total = paths.len();
        DocAnswer::Paths {
            total,
            preview: paths
                .into_iter()
                .take(PATHS_PREVIEW_LIMIT)
                .map(str::to_string)
                .collect(),
            truncated: total > PATHS_PREVIEW_LIMIT,
        }
    }

    /// Render the best few fuzzy matches for `query`
    pub fn search(&self, query: &str) -> DocAnswer {
        let operations: Vec<OperationDetail> = self
            .searcher
            .search(self.index, query)
            .into_iter()
            .take(DEFAULT_RENDERED_MATCHES)
            .map(|found| OperationDetail::from_record(found.record))
            .collect();

        if operations.is_empty() {
            DocAnswer::NoMatches {
                query: query.to_string(),
            }
        } else {
            DocAnswer::Operations {
                query: query.to_string(),
                operations,
            }
        }
    }
}

fn summary_line(prefix: &str, operation: &Value) -> String {
    format!("{prefix} - {}", operation_summary(operation))
        .trim_end()
        .to_string()
}
