//! State management module
//!
//! Tracks replication bookmarks between runs.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - the `{"bookmarks": {...}}` document, keyed by stream name
//! - `StateManager` - loading from a file or inline JSON, bookmark updates
//!   and checkpointing back to disk

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{Bookmark, State};
