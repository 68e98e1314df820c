//! Shared aliases and the replication mode of a stream

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A JSON:API document, record, or fragment of one
pub type JsonValue = serde_json::Value;

/// Query parameters for one page request
pub type StringMap = HashMap<String, String>;

/// How a stream is replicated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Every run reads the whole resource and no bookmark is kept
    #[default]
    FullRefresh,
    /// A bookmark on the replication key is carried between runs
    Incremental,
}

impl SyncMode {
    /// Name used for `replication_method` in the catalog
    pub fn replication_method(self) -> &'static str {
        match self {
            SyncMode::FullRefresh => "FULL_TABLE",
            SyncMode::Incremental => "INCREMENTAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_mode_serde() {
        let mode: SyncMode = serde_json::from_str("\"incremental\"").unwrap();
        assert_eq!(mode, SyncMode::Incremental);

        let json = serde_json::to_string(&SyncMode::FullRefresh).unwrap();
        assert_eq!(json, "\"full_refresh\"");
    }

    #[test]
    fn test_replication_method() {
        assert_eq!(SyncMode::Incremental.replication_method(), "INCREMENTAL");
        assert_eq!(SyncMode::default().replication_method(), "FULL_TABLE");
    }
}
