//! Event log configuration.
//!
//! `EventLogConfig` is deserialized from TOML. Every field is optional and
//! falls back to the defaults below.
//!
//! ```toml
//! min_level = "INFO"
//! console = true
//! file = "logs/events.jsonl"
//! hash_chaining = true
//! chain_id = "app-events"
//! file_buffer = 1024
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use proofchain_contracts::{
    entry::LogLevel,
    error::{ChainError, ChainResult},
};

/// Default capacity of the file sink's hand-off channel.
pub const DEFAULT_FILE_BUFFER: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventLogConfig {
    /// Entries below this level are still chained but not sent to sinks.
    pub min_level: LogLevel,

    /// Present entries through `tracing`.
    pub console: bool,

    /// Append entries as JSON lines to this file.
    pub file: Option<PathBuf>,

    /// Link each entry to its predecessor.
    ///
    /// **Setting this to `false` breaks the chain on purpose**: every entry
    /// links to the zero sentinel and verification reports a break at every
    /// entry after the first. Only for throughput-over-integrity use.
    pub hash_chaining: bool,

    /// Explicit log identifier. Generated when absent.
    pub chain_id: Option<String>,

    /// Entries the file sink may buffer before it starts dropping lines.
    pub file_buffer: usize,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            console: true,
            file: None,
            hash_chaining: true,
            chain_id: None,
            file_buffer: DEFAULT_FILE_BUFFER,
        }
    }
}

impl EventLogConfig {
    /// A config with no sinks, for tests and embedded use.
    pub fn silent() -> Self {
        Self {
            console: false,
            ..Self::default()
        }
    }

    /// Parse `s` as TOML.
    ///
    /// Returns `ChainError::ConfigError` if the TOML is malformed or has
    /// unknown keys.
    pub fn from_toml_str(s: &str) -> ChainResult<Self> {
        toml::from_str(s).map_err(|e| ChainError::ConfigError {
            reason: format!("failed to parse event log TOML: {}", e),
        })
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> ChainResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ChainError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
