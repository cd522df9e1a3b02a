//! Event log entry types.
//!
//! `LogEntry` is one link in an event log's hash chain. `LogEntryContent`
//! lists every field that feeds the entry digest, so hashing and
//! verification can never disagree about what is covered.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    digest::Digest,
    error::{ChainError, ChainResult},
};

/// Severity of a log entry.
///
/// Ordered numerically: `DEBUG=0 < INFO=1 < WARN=2 < ERROR=3 < PROOF=4 <
/// VALIDATION=5`. The wire form is the upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Proof = 4,
    Validation = 5,
}

impl LogLevel {
    /// All levels in ascending order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Proof,
        LogLevel::Validation,
    ];

    /// Numeric wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Proof => "PROOF",
            LogLevel::Validation => "VALIDATION",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ChainError;

    /// Case-insensitive parse of the level name.
    fn from_str(s: &str) -> ChainResult<Self> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChainError::InvalidInput {
                reason: format!("unknown log level '{}'", s),
            })
    }
}

/// Opaque data attached to a log entry.
///
/// The runtime never inspects a payload. It is hashed in canonical form
/// (compact JSON, object keys sorted at every depth), so two payloads that
/// differ only in key order produce the same entry digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(pub serde_json::Value);

impl Payload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A single entry in an event log's hash chain.
///
/// Modifying any field covered by [`LogEntryContent`] after the fact makes
/// the stored `digest` stale, which verification reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Position in the log, starting at 0. Monotonic until the log is reset.
    pub id: u64,

    /// Wall-clock time (UTC) the entry was appended.
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,

    /// Digest of this entry's [`LogEntryContent`].
    pub digest: Digest,

    /// `digest` of the previous entry, or the zero sentinel for entry 0.
    pub previous_digest: Digest,

    /// Identifier of the log this entry belongs to.
    pub chain_id: String,
}

impl LogEntry {
    /// The fields covered by `digest`.
    pub fn content(&self) -> LogEntryContent<'_> {
        LogEntryContent {
            id: self.id,
            timestamp: &self.timestamp,
            level: self.level,
            message: &self.message,
            payload: self.payload.as_ref(),
            previous_digest: &self.previous_digest,
            chain_id: &self.chain_id,
        }
    }
}

/// Hash input for a log entry: everything except the digest itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryContent<'a> {
    pub id: u64,
    pub timestamp: &'a DateTime<Utc>,
    pub level: LogLevel,
    pub message: &'a str,
    pub payload: Option<&'a Payload>,
    pub previous_digest: &'a Digest,
    pub chain_id: &'a str,
}
