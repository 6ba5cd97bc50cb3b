//! Operation index over an API document.
//!
//! Flattens `paths.<path>.<verb>` into one [`OperationRecord`] per
//! (path, verb) pair and orders the records by summary, which is how the
//! assistant presents them in its operation picker.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::openapi::ApiDocument;
use crate::openapi::document::{non_empty_str, operation_summary};
use crate::search::fuzzy::fold_case;

/// HTTP verbs that may carry an operation in a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// Case-insensitive lookup; `None` for vendor extensions and other keys
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(key))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (path, method) operation of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub path: String,
    pub method: HttpMethod,
    /// `summary`, else `operationId`, else empty
    pub summary: String,
    /// Tag names joined with ", "
    pub tags: String,
    /// The operation object as found in the document
    pub raw: Value,
}

impl OperationRecord {
    fn from_operation(path: &str, method: HttpMethod, operation: &Value) -> Self {
        let raw = if operation.is_object() {
            operation.clone()
        } else {
            Value::Object(Map::new())
        };

        Self {
            path: path.to_string(),
            method,
            summary: operation_summary(&raw),
            tags: join_tags(&raw),
            raw,
        }
    }

    pub fn operation_id(&self) -> Option<&str> {
        non_empty_str(&self.raw, "operationId")
    }

    pub fn description(&self) -> Option<&str> {
        non_empty_str(&self.raw, "description")
    }

    /// Label used by operation pickers: `<summary> — METHOD /path`
    pub fn display_label(&self) -> String {
        let endpoint = format!("{} {}", self.method, self.path);
        if self.summary.is_empty() {
            format!("{endpoint} — {endpoint}")
        } else {
            format!("{} — {endpoint}", self.summary)
        }
    }
}

fn join_tags(operation: &Value) -> String {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

/// Sorted, immutable list of every operation in one document.
///
/// Built in full from a document and replaced as a whole on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationIndex {
    records: Vec<OperationRecord>,
}

impl OperationIndex {
    /// Build the index for `document`
    pub fn build(document: &ApiDocument) -> Self {
        match document.paths() {
            Some(paths) => Self::from_paths(paths),
            None => Self::default(),
        }
    }

    /// Build the index from a `paths` mapping
    pub fn from_paths(paths: &Map<String, Value>) -> Self {
        let mut records = Vec::new();

        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                tracing::debug!("Skipping non-object path item for {}", path);
                continue;
            };

            for (key, operation) in item {
                if let Some(method) = HttpMethod::from_key(key) {
                    records.push(OperationRecord::from_operation(path, method, operation));
                }
            }
        }

        // Stable sort keeps document order between equal summaries
        records.sort_by_cached_key(|record| fold_case(&record.summary));

        tracing::debug!("Indexed {} operations", records.len());
        Self { records }
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&OperationRecord> {
        self.records.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records registered under `path`
    pub fn find_by_path<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a OperationRecord> {
        self.records.iter().filter(move |record| record.path == path)
    }
}

impl<'a> IntoIterator for &'a OperationIndex {
    type Item = &'a OperationRecord;
    type IntoIter = std::slice::Iter<'a, OperationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
