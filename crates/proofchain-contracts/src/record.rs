//! Proof record types.
//!
//! A `ProofRecord` carries two kinds of digest:
//!
//! - **content digests** (`input_digest`, `output_digest`) re-derive from the
//!   raw bodies and detect edits to the bodies;
//! - the **chain digest** covers only the link fields in
//!   [`RecordLinkFields`] and detects structural tampering or reordering.
//!
//! The two are checked independently, so a record can fail one while
//! passing the other.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    digest::Digest,
    error::{ChainError, ChainResult},
};

/// Width of the zero-padded sequence number used as a record id.
pub const RECORD_ID_WIDTH: usize = 6;

/// Format the chain-scoped id for sequence number `seq` (e.g. `"000042"`).
pub fn record_id(seq: u64) -> String {
    format!("{:0width$}", seq, width = RECORD_ID_WIDTH)
}

/// What kind of proof a record captures.
///
/// Wire values are the upper-case names and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProofType {
    Formula,
    Theorem,
    Computation,
    Axiom,
    Validation,
    Integration,
}

impl ProofType {
    pub const ALL: [ProofType; 6] = [
        ProofType::Formula,
        ProofType::Theorem,
        ProofType::Computation,
        ProofType::Axiom,
        ProofType::Validation,
        ProofType::Integration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProofType::Formula => "FORMULA",
            ProofType::Theorem => "THEOREM",
            ProofType::Computation => "COMPUTATION",
            ProofType::Axiom => "AXIOM",
            ProofType::Validation => "VALIDATION",
            ProofType::Integration => "INTEGRATION",
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProofType {
    type Err = ChainError;

    fn from_str(s: &str) -> ChainResult<Self> {
        ProofType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChainError::InvalidInput {
                reason: format!("unknown proof type '{}'", s),
            })
    }
}

/// Free-form metadata attached to a record. Not covered by any digest.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One typed (input, output) proof in a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    /// Zero-padded sequence number, unique within the chain.
    pub id: String,

    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub proof_type: ProofType,

    /// Raw input body, e.g. `"2+2"`.
    pub input: String,

    /// Raw output body, e.g. `"4"`.
    pub output: String,

    pub input_digest: Digest,

    pub output_digest: Digest,

    /// `chain_digest` of the previous record, or the zero sentinel.
    pub previous_digest: Digest,

    /// Digest of [`RecordLinkFields`].
    pub chain_digest: Digest,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl ProofRecord {
    /// The fields covered by `chain_digest`.
    pub fn link_fields(&self) -> RecordLinkFields<'_> {
        RecordLinkFields {
            id: &self.id,
            timestamp: &self.timestamp,
            proof_type: self.proof_type,
            input_digest: &self.input_digest,
            output_digest: &self.output_digest,
            previous_digest: &self.previous_digest,
        }
    }
}

/// Hash input for a record's chain digest. Raw bodies are deliberately
/// absent; they are covered by the content digests instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLinkFields<'a> {
    pub id: &'a str,
    pub timestamp: &'a DateTime<Utc>,
    #[serde(rename = "type")]
    pub proof_type: ProofType,
    pub input_digest: &'a Digest,
    pub output_digest: &'a Digest,
    pub previous_digest: &'a Digest,
}
