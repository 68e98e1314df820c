//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Drives one stream at a time through
//!   `fetch page -> parse -> emit -> next token | done`
//! - `SyncConfig` - Page size and page limits
//! - `Message` and `MessageSink` - the output protocol and where it goes

mod types;

pub use types::{JsonLinesSink, Message, MessageSink, SyncConfig, SyncStats};

use crate::decode::{JsonApiDecoder, RecordDecoder};
use crate::error::{Result, ResultExt};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{JsonApiPaginator, NextPage, PaginationState, Paginator};
use crate::state::StateManager;
use crate::streams::StreamDefinition;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Record decoder
    decoder: JsonApiDecoder,
    /// Page cursor resolution
    paginator: JsonApiPaginator,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            decoder: JsonApiDecoder::new(),
            paginator: JsonApiPaginator::new(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Get mutable statistics
    pub fn stats_mut(&mut self) -> &mut SyncStats {
        &mut self.stats
    }

    /// Fetch and decode a single page of a stream
    async fn fetch_page(
        &self,
        stream: &StreamDefinition,
        pagination: &PaginationState,
    ) -> Result<(Value, reqwest::header::HeaderMap)> {
        let params = stream.url_params(pagination.current.as_ref(), self.config.page_size);
        let response = self
            .client
            .get_with_config(stream.path, RequestConfig::new().with_query(params))
            .await?;

        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response body", stream.name))?;
        let page = self.decoder.parse(&body)?;
        Ok((page, headers))
    }

    /// Fetch the first page of a stream and return how many records it held
    pub async fn probe(&self, stream: &StreamDefinition) -> Result<usize> {
        let (page, _) = self.fetch_page(stream, &PaginationState::new()).await?;
        Ok(self.decoder.records(&page)?.len())
    }

    /// Sync a single stream, emitting its schema, records and final state
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut dyn MessageSink,
    ) -> Result<usize> {
        let start = Instant::now();
        info!(stream = stream.name, "Starting sync");

        let bookmark_properties = stream
            .replication_key
            .map(|k| vec![k.to_string()])
            .unwrap_or_default();
        sink.emit(&Message::schema(
            stream.name,
            stream.schema.to_json(),
            stream.key_properties(),
            bookmark_properties,
        ))?;

        let mut pagination = PaginationState::new();
        let mut emitted = 0usize;

        loop {
            let (page, headers) = self.fetch_page(stream, &pagination).await?;
            self.stats.pages_fetched += 1;

            let records = self.decoder.records(&page)?;
            let record_count = records.len();

            for raw in records {
                let Some(record) = stream.post_process(raw) else {
                    self.stats.records_skipped += 1;
                    continue;
                };

                if let (Some(key), Some(value)) =
                    (stream.replication_key, stream.replication_value(&record))
                {
                    self.state.update_bookmark(stream.name, key, value).await;
                }

                sink.emit(&Message::record(stream.name, record))?;
                emitted += 1;
            }

            pagination.add_page(record_count as u64);
            debug!(
                stream = stream.name,
                page = pagination.pages_fetched,
                records = record_count,
                "Fetched page"
            );

            if self.config.max_pages > 0 && pagination.pages_fetched as usize >= self.config.max_pages
            {
                info!(
                    stream = stream.name,
                    "Reached max pages ({}), stopping", self.config.max_pages
                );
                break;
            }

            match self.paginator.next_page(&page, &headers, &mut pagination) {
                NextPage::Continue(token) => pagination.advance(token),
                NextPage::Done => break,
            }
        }

        if stream.replication_key.is_some() {
            sink.emit(&Message::state(self.state.snapshot().await.to_json()))?;
            self.state.checkpoint().await?;
        }

        self.stats.records_synced += emitted;
        self.stats.streams_synced += 1;
        self.stats.elapsed += start.elapsed();

        info!(
            stream = stream.name,
            "Completed sync: {} records in {} pages", emitted, pagination.pages_fetched
        );

        Ok(emitted)
    }
}
