//! The stream descriptor and its request/record behavior

use crate::pagination::PageToken;
use crate::schema::JsonSchema;
use crate::types::{JsonValue, StringMap, SyncMode};
use tracing::warn;

/// Query parameter carrying the page number
pub const PAGE_NUMBER_PARAM: &str = "page[number]";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page[size]";

/// Static description of one API resource
#[derive(Debug, Clone)]
pub struct StreamDefinition {
    /// Stream name, unique across the connector
    pub name: &'static str,
    /// Endpoint path relative to the API base URL
    pub path: &'static str,
    /// Fields identifying a record
    pub primary_keys: &'static [&'static str],
    /// Field tracked for incremental bookmarks
    pub replication_key: Option<&'static str>,
    /// Related resources requested through `include`
    pub includes: &'static [&'static str],
    /// Filters sent with every request, in order
    pub extra_filters: &'static [(&'static str, &'static str)],
    /// Record schema
    pub schema: JsonSchema,
}

impl StreamDefinition {
    /// Sync mode implied by the replication key
    pub fn sync_mode(&self) -> SyncMode {
        if self.replication_key.is_some() {
            SyncMode::Incremental
        } else {
            SyncMode::FullRefresh
        }
    }

    /// Query parameters for a page request.
    ///
    /// The first request carries no page parameters. Static filters are
    /// applied last and win over anything set before them.
    pub fn url_params(&self, token: Option<&PageToken>, page_size: u32) -> StringMap {
        let mut params = StringMap::new();

        if let Some(token) = token {
            params.insert(PAGE_NUMBER_PARAM.to_string(), token.to_string());
            params.insert(PAGE_SIZE_PARAM.to_string(), page_size.to_string());
        }

        if let Some(key) = self.replication_key {
            params.insert("sort".to_string(), format!("-{key}"));
        }

        if !self.includes.is_empty() {
            params.insert("include".to_string(), self.includes.join(","));
        }

        for (key, value) in self.extra_filters {
            params.insert((*key).to_string(), (*value).to_string());
        }

        params
    }

    /// Prepare a raw resource object for output.
    ///
    /// Returns `None` for records without an `id`. Streams with a replication
    /// key get that attribute lifted to the top level (null when absent).
    pub fn post_process(&self, mut record: JsonValue) -> Option<JsonValue> {
        if record.get("id").map_or(true, JsonValue::is_null) {
            warn!(stream = self.name, "Skipping record without id");
            return None;
        }

        if let Some(key) = self.replication_key {
            let value = record
                .get("attributes")
                .and_then(|attrs| attrs.get(key))
                .cloned()
                .unwrap_or(JsonValue::Null);

            if let JsonValue::Object(map) = &mut record {
                map.insert(key.to_string(), value);
            }
        }

        Some(record)
    }

    /// Replication value of a processed record, if it has one
    pub fn replication_value<'a>(&self, record: &'a JsonValue) -> Option<&'a str> {
        let key = self.replication_key?;
        record.get(key).and_then(JsonValue::as_str)
    }

    /// Primary keys as owned strings
    pub fn key_properties(&self) -> Vec<String> {
        self.primary_keys.iter().map(|k| (*k).to_string()).collect()
    }
}
