//! Plain-text rendering of a single operation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::RESPONSE_CODES_PREVIEW_LIMIT;
use crate::search::{HttpMethod, OperationRecord};

/// One declared parameter of an operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterInfo {
    pub name: String,
    /// Parameter location (`query`, `path`, `header`, `cookie`)
    pub location: String,
    pub required: bool,
}

impl ParameterInfo {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object
            .get("name")
            .or_else(|| object.get("$ref"))
            .and_then(Value::as_str)
            .unwrap_or("-");
        let location = object.get("in").and_then(Value::as_str).unwrap_or("-");
        let required = object
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(Self {
            name: name.to_string(),
            location: location.to_string(),
            required,
        })
    }

    fn label(&self) -> String {
        let required = if self.required { " (required)" } else { "" };
        format!("{}{} [{}]", self.name, required, self.location)
    }
}

/// The key facts of an operation, as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationDetail {
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub tags: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<ParameterInfo>,
    pub has_request_body: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub response_codes: Vec<String>,
}

impl OperationDetail {
    pub fn from_record(record: &OperationRecord) -> Self {
        let raw = &record.raw;

        let parameters = raw
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| params.iter().filter_map(ParameterInfo::from_value).collect())
            .unwrap_or_default();

        let response_codes = raw
            .get("responses")
            .and_then(Value::as_object)
            .map(|responses| responses.keys().cloned().collect())
            .unwrap_or_default();

        let has_request_body = raw
            .get("requestBody")
            .is_some_and(|body| !body.is_null());

        Self {
            method: record.method,
            path: record.path.clone(),
            summary: record.summary.clone(),
            tags: record.tags.clone(),
            parameters,
            has_request_body,
            response_codes,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        let summary = if self.summary.is_empty() {
            "-"
        } else {
            &self.summary
        };
        lines.push(format!("Summary: {summary}"));
        lines.push(format!("Path: {} {}", self.method, self.path));

        if !self.tags.is_empty() {
            lines.push(format!("Tags: {}", self.tags));
        }

        if !self.parameters.is_empty() {
            let params: Vec<String> = self.parameters.iter().map(ParameterInfo::label).collect();
            lines.push(format!("Parameters: {}", params.join(", ")));
        }

        if self.has_request_body {
            lines.push("Request body: present".to_string());
        }

        if !self.response_codes.is_empty() {
            let shown: Vec<&str> = self
                .response_codes
                .iter()
                .take(RESPONSE_CODES_PREVIEW_LIMIT)
                .map(String::as_str)
                .collect();
            let more = if self.response_codes.len() > RESPONSE_CODES_PREVIEW_LIMIT {
                " …"
            } else {
                ""
            };
            lines.push(format!("Response codes: {}{more}", shown.join(", ")));
        }

        lines
    }

    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}
