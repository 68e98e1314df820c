//! Decoder implementations

use super::types::{RecordDecoder, Records};
use crate::error::{Error, Result};
use serde_json::Value;

/// Where JSON:API responses keep their resource objects
pub const DEFAULT_RECORD_PATH: &str = "$.data[*]";

/// Reads the resource objects out of a JSON:API document
#[derive(Debug, Clone)]
pub struct JsonApiDecoder {
    record_path: String,
}

impl Default for JsonApiDecoder {
    fn default() -> Self {
        Self {
            record_path: DEFAULT_RECORD_PATH.to_string(),
        }
    }
}

impl JsonApiDecoder {
    /// Create a decoder reading `$.data[*]`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: path.into(),
        }
    }

    /// The configured record path
    pub fn record_path(&self) -> &str {
        &self.record_path
    }
}

impl RecordDecoder for JsonApiDecoder {
    fn parse(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
    }

    fn records(&self, page: &Value) -> Result<Records> {
        let records = if self.record_path.contains('*') {
            extract_with_jsonpath(page, &self.record_path)?
        } else {
            match extract_path(page, &self.record_path) {
                Some(Value::Array(arr)) => arr.clone(),
                Some(Value::Null) | None => vec![],
                Some(v) => vec![v.clone()],
            }
        };
        Ok(records.into_iter())
    }
}

/// Look up a value by dotted path (`$.links.next` or `links.next`).
///
/// The path is turned into a JSON pointer, so numeric segments also index
/// into arrays.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let pointer: String = path
        .split('.')
        .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
        .collect();
    value.pointer(&pointer)
}

/// Look up a scalar by simple path and render it as a string
pub fn extract_string(value: &Value, path: &str) -> Option<String> {
    match extract_path(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
