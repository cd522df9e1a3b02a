//! Error types for the proofchain crates.
//!
//! Fallible operations return `ChainResult<T>`. Integrity failures found by
//! verification are NOT errors; they are reported as data in
//! [`VerificationReport`](crate::report::VerificationReport).

use thiserror::Error;

/// The unified error type for the proofchain workspace.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A caller-supplied value or document is malformed.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A chain with this identifier is already registered.
    #[error("chain identifier '{chain_id}' is already in use")]
    DuplicateChainId { chain_id: String },

    /// A value could not be represented as canonical JSON.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A presentation sink could not accept an entry.
    ///
    /// Only ever produced by `LogSink::emit`. The event log catches it at the
    /// sink boundary; it never reaches callers of `EventLog::log`.
    #[error("sink '{sink}' failed: {reason}")]
    SinkFailure { sink: String, reason: String },

    /// Reading or writing an export file failed.
    #[error("i/o error: {reason}")]
    Io { reason: String },

    /// A writer panicked while holding a chain lock.
    #[error("chain lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

impl From<serde_json::Error> for ChainError {
    fn from(e: serde_json::Error) -> Self {
        ChainError::Serialization {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for ChainError {
    fn from(e: std::io::Error) -> Self {
        ChainError::Io {
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the proofchain crates.
pub type ChainResult<T> = Result<T, ChainError>;
