//! Permissive view over an OpenAPI / Swagger JSON document.
//!
//! Generated documents are frequently incomplete, so every accessor degrades
//! to `None` or an empty list instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An API description document as served by `/v3/api-docs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiDocument {
    raw: Value,
}

impl ApiDocument {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self::from_value)
    }

    /// The `openapi` (or legacy `swagger`) version string
    pub fn openapi_version(&self) -> Option<&str> {
        self.raw
            .get("openapi")
            .or_else(|| self.raw.get("swagger"))
            .and_then(Value::as_str)
    }

    /// The `paths` mapping, in document order
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.raw.get("paths").and_then(Value::as_object)
    }

    /// Path keys in document order
    pub fn path_keys(&self) -> Vec<&str> {
        self.paths()
            .map(|paths| paths.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The path item object registered under `path`
    pub fn path_item(&self, path: &str) -> Option<&Map<String, Value>> {
        self.paths()?.get(path).and_then(Value::as_object)
    }

    /// Non-empty names of the top-level `tags` array
    pub fn tag_names(&self) -> Vec<String> {
        self.string_fields("tags", "name")
    }

    /// Non-empty urls of the top-level `servers` array
    pub fn server_urls(&self) -> Vec<String> {
        self.string_fields("servers", "url")
    }

    fn string_fields(&self, array_key: &str, field: &str) -> Vec<String> {
        self.raw
            .get(array_key)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get(field).and_then(Value::as_str))
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Summary text of an operation object: `summary`, else `operationId`, else empty
pub fn operation_summary(operation: &Value) -> String {
    non_empty_str(operation, "summary")
        .or_else(|| non_empty_str(operation, "operationId"))
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_well_formed_document() {
        let doc = ApiDocument::from_value(json!({
            "openapi": "3.0.1",
            "paths": {"/users": {}, "/orders": {}},
            "tags": [{"name": "User"}, {"name": ""}, {"description": "no name"}],
            "servers": [{"url": "http://localhost:8080"}]
        }));

        assert_eq!(doc.openapi_version(), Some("3.0.1"));
        assert_eq!(doc.path_keys(), vec!["/users", "/orders"]);
        assert_eq!(doc.tag_names(), vec!["User".to_string()]);
        assert_eq!(doc.server_urls(), vec!["http://localhost:8080".to_string()]);
        assert!(doc.path_item("/users").is_some());
        assert!(doc.path_item("/missing").is_none());
    }

    #[test]
    fn malformed_fields_degrade_to_empty() {
        let doc = ApiDocument::from_value(json!({
            "paths": ["not", "an", "object"],
            "tags": "nope",
            "servers": null
        }));

        assert!(doc.paths().is_none());
        assert!(doc.path_keys().is_empty());
        assert!(doc.tag_names().is_empty());
        assert!(doc.server_urls().is_empty());
        assert_eq!(doc.openapi_version(), None);
    }

    #[test]
    fn summary_falls_back_to_operation_id() {
        assert_eq!(operation_summary(&json!({"summary": "List users"})), "List users");
        assert_eq!(
            operation_summary(&json!({"summary": "", "operationId": "listUsers"})),
            "listUsers"
        );
        assert_eq!(operation_summary(&json!({"summary": 42})), "");
        assert_eq!(operation_summary(&Value::Null), "");
    }
}
