// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-teamtailor
//!
//! A Singer-style extractor for the Teamtailor recruitment API.
//!
//! ## Features
//!
//! - **Six JSON:API streams**: job offers, jobs, job applications, stages,
//!   requisitions and candidates, each with a static schema
//! - **Page-number pagination**: follows `links.next`, with the
//!   `X-Next-Page` header as a fallback
//! - **Rate-limit aware**: honors `X-Rate-Limit-Reset` on HTTP 429
//! - **Incremental bookmarks**: tracks the latest `updated-at` per stream
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_teamtailor::{config::TapConfig, engine::*, http::HttpClient, state::StateManager, streams};
//!
//! #[tokio::main]
//! async fn main() -> tap_teamtailor::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let client = HttpClient::from_tap_config(&config)?;
//!     let mut engine = SyncEngine::new(client, StateManager::in_memory());
//!
//!     let mut sink = JsonLinesSink::stdout();
//!     for stream in streams::all() {
//!         engine.sync_stream(stream, &mut sink).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI: spec · check · discover · streams · read               │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │  SyncEngine: fetch page → decode → post-process → emit       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬───────────┬──────┴──────┬───────────┬────────────┐
//! │   Auth   │   HTTP    │  Paginate   │  Streams  │   State    │
//! ├──────────┼───────────┼─────────────┼───────────┼────────────┤
//! │ Token    │ Retry     │ links.next  │ Table     │ Bookmarks  │
//! │          │ 429 wait  │ X-Next-Page │ Schemas   │ Checkpoint │
//! │          │ Throttle  │ Loop guard  │ Params    │            │
//! └──────────┴───────────┴─────────────┴───────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page cursor resolution
pub mod pagination;

/// Response decoders
pub mod decode;

/// Record schemas
pub mod schema;

/// Stream definitions
pub mod streams;

/// Bookmark state and checkpointing
pub mod state;

/// Main execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
