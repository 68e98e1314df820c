//! State types for tracking sync progress
//!
//! These types are serialized to JSON and emitted as `STATE` messages.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Complete state for the connector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, Bookmark>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bookmark for a stream
    pub fn get_bookmark(&self, stream: &str) -> Option<&Bookmark> {
        self.bookmarks.get(stream)
    }

    /// Get the replication value recorded for a stream
    pub fn bookmark_value(&self, stream: &str) -> Option<&str> {
        self.bookmarks.get(stream)?.replication_key_value.as_deref()
    }

    /// Record a replication value, keeping the greater of old and new.
    ///
    /// Returns true if the stored value changed.
    pub fn update_bookmark(&mut self, stream: &str, replication_key: &str, value: &str) -> bool {
        let bookmark = self
            .bookmarks
            .entry(stream.to_string())
            .or_insert_with(|| Bookmark::new(replication_key));

        if bookmark.replication_key != replication_key {
            *bookmark = Bookmark::new(replication_key);
        }

        let newer = bookmark
            .replication_key_value
            .as_deref()
            .map_or(true, |current| compare_values(value, current) == Ordering::Greater);

        if newer {
            bookmark.replication_key_value = Some(value.to_string());
        }
        newer
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Bookmark for a single stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Field the bookmark tracks
    pub replication_key: String,

    /// Greatest value seen for that field
    #[serde(default)]
    pub replication_key_value: Option<String>,
}

impl Bookmark {
    /// Create an empty bookmark for a replication key
    pub fn new(replication_key: impl Into<String>) -> Self {
        Self {
            replication_key: replication_key.into(),
            replication_key_value: None,
        }
    }
}

/// Order two replication values. Timestamps compare as instants so that
/// differing UTC offsets are handled; anything else compares as text.
fn compare_values(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.bookmarks.is_empty());
        assert_eq!(state.to_json(), json!({"bookmarks": {}}));
    }

    #[test]
    fn test_update_bookmark_keeps_max() {
        let mut state = State::new();
        assert!(state.update_bookmark("jobs", "updated-at", "2024-01-02T00:00:00Z"));
        assert!(!state.update_bookmark("jobs", "updated-at", "2024-01-01T00:00:00Z"));
        assert!(state.update_bookmark("jobs", "updated-at", "2024-01-03T00:00:00Z"));

        assert_eq!(state.bookmark_value("jobs"), Some("2024-01-03T00:00:00Z"));
    }

    #[test]
    fn test_update_bookmark_compares_instants() {
        let mut state = State::new();
        state.update_bookmark("stages", "updated-at", "2024-03-01T10:30:00+01:00");

        // 09:45Z is later than 10:30+01:00 (09:30Z) despite sorting lower as text
        assert!(state.update_bookmark("stages", "updated-at", "2024-03-01T09:45:00Z"));
        assert_eq!(
            state.bookmark_value("stages"),
            Some("2024-03-01T09:45:00Z")
        );
    }

    #[test]
    fn test_changed_replication_key_resets_bookmark() {
        let mut state = State::new();
        state.update_bookmark("jobs", "created-at", "2030-01-01T00:00:00Z");
        assert!(state.update_bookmark("jobs", "updated-at", "2024-01-01T00:00:00Z"));

        let bookmark = state.get_bookmark("jobs").unwrap();
        assert_eq!(bookmark.replication_key, "updated-at");
        assert_eq!(
            bookmark.replication_key_value.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_state_serialization() {
        let mut state = State::new();
        state.update_bookmark("candidates", "updated-at", "2024-05-05T12:00:00Z");

        assert_eq!(
            state.to_json(),
            json!({
                "bookmarks": {
                    "candidates": {
                        "replication_key": "updated-at",
                        "replication_key_value": "2024-05-05T12:00:00Z"
                    }
                }
            })
        );

        let restored: State = serde_json::from_value(state.to_json()).unwrap();
        assert_eq!(restored, state);
    }
}
