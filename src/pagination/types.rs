//! Pagination types and traits

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Opaque page cursor as handed out by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PageToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page is available behind this token
    Continue(PageToken),
    /// No more pages
    Done,
}

/// Tracks pagination progress for one stream run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Token used for the request currently being processed
    pub current: Option<PageToken>,
    /// Number of pages fetched so far
    pub pages_fetched: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
    /// Every token requested so far in this run
    requested: HashSet<PageToken>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record a fetched page and its record count
    pub fn add_page(&mut self, records: u64) {
        self.pages_fetched += 1;
        self.total_fetched += records;
    }

    /// Move on to the given token
    pub fn advance(&mut self, token: PageToken) {
        self.requested.insert(token.clone());
        self.current = Some(token);
    }

    /// Whether `token` was already requested in this run
    pub fn has_requested(&self, token: &PageToken) -> bool {
        self.requested.contains(token)
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Inspect a response and decide whether another page follows.
    ///
    /// Implementations mark `state` done when they return [`NextPage::Done`].
    fn next_page(&self, body: &Value, headers: &HeaderMap, state: &mut PaginationState)
        -> NextPage;
}
