//! Export documents.
//!
//! These are the JSON shapes written by `export_to_json` and read back by
//! `import_from_json`. Keys are camelCase to stay compatible with chains
//! exported by other implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{digest::Digest, entry::LogEntry, record::ProofRecord};

/// A sealed snapshot of one proof chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainExport {
    pub chain_id: String,
    /// When the chain was created (not when it was exported).
    pub created_at: DateTime<Utc>,
    pub record_count: usize,
    /// `chain_digest` of the last record, or the zero sentinel.
    pub last_digest: Digest,
    /// Verification result computed at export time.
    pub verified: bool,
    pub records: Vec<ProofRecord>,
}

/// A sealed snapshot of an event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogExport {
    pub proof_chain_id: String,
    pub entry_count: usize,
    pub last_digest: Digest,
    pub entries: Vec<LogEntry>,
    pub verified: bool,
}
