//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::{JsonLinesSink, SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::state::StateManager;
use crate::streams::{self, StreamDefinition};
use serde_json::{json, Value};
use std::io::{Stdout, Write};
use tracing::{error, info};

/// Stream probed by `check`
const CHECK_STREAM: &str = "stages";

/// CLI runner
pub struct Runner<W: Write = Stdout> {
    cli: Cli,
    output: JsonLinesSink<W>,
}

impl Runner<Stdout> {
    /// Create a runner writing to standard output
    pub fn new(cli: Cli) -> Self {
        Self::with_writer(cli, std::io::stdout())
    }
}

impl<W: Write> Runner<W> {
    /// Create a runner writing messages to the given writer
    pub fn with_writer(cli: Cli, writer: W) -> Self {
        Self {
            cli,
            output: JsonLinesSink::new(writer),
        }
    }

    /// Consume the runner and return its writer
    pub fn into_writer(self) -> W {
        self.output.into_inner()
    }

    /// Run the CLI command
    pub async fn run(&mut self) -> Result<()> {
        match self.cli.command.clone() {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Discover => self.discover(),
            Commands::Streams => self.streams(),
            Commands::Read { streams, max_pages } => {
                let selected = Commands::parse_stream_list(streams.as_deref());
                self.read(&selected, max_pages.unwrap_or(0)).await
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration provided (use --config or --config-json)",
        ))
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    fn build_engine(&self, config: &TapConfig, max_pages: usize) -> Result<SyncEngine> {
        let client = HttpClient::from_tap_config(config)?;
        let sync_config = SyncConfig::new()
            .with_page_size(config.page_size)
            .with_max_pages(max_pages);
        Ok(SyncEngine::new(client, self.load_state()?).with_config(sync_config))
    }

    /// Show spec
    fn spec(&mut self) -> Result<()> {
        self.output.write_json(&json!({
            "type": "SPEC",
            "spec": {
                "connectionSpecification": TapConfig::json_schema()
            }
        }))
    }

    /// Check connection by fetching the first page of a cheap stream
    async fn check(&mut self) -> Result<()> {
        let config = self.load_config()?;
        let engine = self.build_engine(&config, 1)?;
        let stream = streams::find(CHECK_STREAM)?;

        let status = match engine.probe(stream).await {
            Ok(count) => {
                info!("Connection check fetched {} {}", count, CHECK_STREAM);
                json!({"status": "SUCCEEDED", "message": "Connection successful"})
            }
            Err(e) => {
                error!("Connection check failed: {e}");
                json!({"status": "FAILED", "message": format!("Connection failed: {e}")})
            }
        };

        self.output.write_json(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }))
    }

    /// Discover streams
    fn discover(&mut self) -> Result<()> {
        let streams: Vec<Value> = streams::all().iter().map(catalog_entry).collect();

        self.output.write_json(&json!({
            "type": "CATALOG",
            "catalog": {
                "streams": streams
            }
        }))
    }

    /// List available streams (lightweight, no schemas)
    fn streams(&mut self) -> Result<()> {
        self.output.write_json(&json!({
            "type": "STREAMS",
            "streams": streams::names(),
            "connector": crate::NAME
        }))
    }

    /// Sync the selected streams in order.
    ///
    /// A failing stream is logged and skipped; the run fails at the end if
    /// any stream did.
    async fn read(&mut self, selected: &[String], max_pages: usize) -> Result<()> {
        let config = self.load_config()?;
        let definitions = streams::select(selected)?;
        let mut engine = self.build_engine(&config, max_pages)?;

        let mut failed = Vec::new();

        for stream in definitions {
            if let Err(e) = engine.sync_stream(stream, &mut self.output).await {
                error!(stream = stream.name, "Stream failed: {e}");
                engine.stats_mut().errors += 1;
                failed.push(stream.name);
            }
        }

        info!("Sync finished: {}", engine.stats());

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} stream(s) failed: {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }
}

/// Catalog entry for one stream
fn catalog_entry(stream: &StreamDefinition) -> Value {
    json!({
        "tap_stream_id": stream.name,
        "stream": stream.name,
        "schema": stream.schema.to_json(),
        "key_properties": stream.key_properties(),
        "replication_key": stream.replication_key,
        "replication_method": stream.sync_mode().replication_method()
    })
}
