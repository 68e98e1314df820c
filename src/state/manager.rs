//! Loading, updating and persisting bookmarks

use super::types::State;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the run's bookmarks. Clones see the same state.
#[derive(Debug, Clone)]
pub struct StateManager {
    /// Where checkpoints go, `None` when state only lives for this run
    file: Option<PathBuf>,
    state: Arc<RwLock<State>>,
}

impl StateManager {
    fn with_state(file: Option<PathBuf>, state: State) -> Self {
        Self {
            file,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_state(None, State::new())
    }

    /// Back the state with `path`. A file that does not exist yet is the
    /// first run of the connector and starts with no bookmarks.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let state = match std::fs::read_to_string(path) {
            Ok(contents) => parse_state(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => State::new(),
            Err(e) => {
                return Err(Error::state(format!(
                    "Failed to read state file {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self::with_state(Some(path.to_path_buf()), state))
    }

    /// State passed inline, e.g. `--state-json`. Never written back.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::with_state(None, parse_state(json)?))
    }

    pub async fn snapshot(&self) -> State {
        self.state.read().await.clone()
    }

    pub async fn bookmark_value(&self, stream: &str) -> Option<String> {
        self.state
            .read()
            .await
            .bookmark_value(stream)
            .map(ToString::to_string)
    }

    /// Record a replication value for a stream. Returns whether the
    /// bookmark moved.
    pub async fn update_bookmark(&self, stream: &str, replication_key: &str, value: &str) -> bool {
        self.state
            .write()
            .await
            .update_bookmark(stream, replication_key, value)
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_in_memory(&self) -> bool {
        self.file.is_none()
    }

    /// Write the state file, replacing it atomically through a sibling
    /// `.tmp` file. Does nothing for in-memory state.
    pub async fn checkpoint(&self) -> Result<()> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        let contents = serde_json::to_string_pretty(&*self.state.read().await)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;

        let staged = path.with_extension("tmp");
        tokio::fs::write(&staged, contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write {}: {e}", staged.display())))?;
        tokio::fs::rename(&staged, path)
            .await
            .map_err(|e| Error::state(format!("Failed to replace {}: {e}", path.display())))
    }
}

fn parse_state(json: &str) -> Result<State> {
    if json.trim().is_empty() {
        return Ok(State::new());
    }
    serde_json::from_str(json).map_err(|e| Error::state(format!("Failed to parse state: {e}")))
}
