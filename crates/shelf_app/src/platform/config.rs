//! Optional RON configuration file.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//! Command line flags win over anything set here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::Deserialize;
use shelf_core::{StatusMessage, StatusMessageSequence, DEFAULT_TICK_INTERVAL};
use shelf_engine::CollaboratorSettings;

const DEFAULT_CONFIG_FILENAME: &str = "shelf.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub library: String,
    pub branch: String,
    pub tick_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Replaces the built-in status script when non-empty.
    pub status_messages: Vec<String>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let collaborator = CollaboratorSettings::default();
        Self {
            endpoint: None,
            library: "sfpl".to_string(),
            branch: "MAIN".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            connect_timeout_secs: collaborator.connect_timeout.as_secs(),
            request_timeout_secs: collaborator.request_timeout.as_secs(),
            status_messages: Vec::new(),
            log_file: PathBuf::from("./shelf.log"),
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), else `./shelf.ron` if present,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parses and validates; zero intervals or timeouts are rejected.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(content)?;
        ensure!(config.tick_interval_ms > 0, "tick_interval_ms must be greater than zero");
        ensure!(
            config.connect_timeout_secs > 0,
            "connect_timeout_secs must be greater than zero"
        );
        ensure!(
            config.request_timeout_secs > 0,
            "request_timeout_secs must be greater than zero"
        );
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn status_sequence(&self) -> StatusMessageSequence {
        let messages = self
            .status_messages
            .iter()
            .map(StatusMessage::plain)
            .collect();
        StatusMessageSequence::new(messages).unwrap_or_default()
    }

    pub fn collaborator_settings(&self, endpoint_override: Option<&str>) -> CollaboratorSettings {
        let defaults = CollaboratorSettings::default();
        CollaboratorSettings {
            endpoint: endpoint_override
                .map(ToOwned::to_owned)
                .or_else(|| self.endpoint.clone())
                .unwrap_or(defaults.endpoint),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: defaults.max_bytes,
        }
    }
}
