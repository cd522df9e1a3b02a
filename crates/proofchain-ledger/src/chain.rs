//! A single chain of typed proof records.
//!
//! `ProofChain` keeps its records behind a `Mutex`. `add_record` holds the
//! lock across read-tail / hash / push / advance-tail, so concurrent callers
//! always produce a correctly linked chain. Readers and `verify` work on a
//! cloned snapshot and never observe a half-appended record.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use proofchain_contracts::{
    digest::Digest,
    error::{ChainError, ChainResult},
    export::ChainExport,
    id::generate_chain_id,
    record::{record_id, Metadata, ProofRecord, ProofType},
    report::VerificationReport,
};
use proofchain_hash::{hash, hash_object, merkle_root};

use crate::verify::verify_records;

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct ChainState {
    /// Records in append order.
    pub(crate) records: Vec<ProofRecord>,

    /// Record id → position in `records`.
    pub(crate) index: HashMap<String, usize>,

    /// Sequence number for the next record id.
    pub(crate) next_seq: u64,

    /// `chain_digest` of the last record, or the zero sentinel.
    pub(crate) last_digest: Digest,
}

impl ChainState {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            next_seq: 0,
            last_digest: Digest::zero(),
        }
    }
}

// ── Public chain ──────────────────────────────────────────────────────────────

/// An append-only chain of proof records with its own identifier.
pub struct ProofChain {
    chain_id: String,
    created_at: DateTime<Utc>,
    pub(crate) state: Mutex<ChainState>,
}

impl ProofChain {
    /// A new empty chain with a generated identifier.
    pub fn new() -> Self {
        Self::build(generate_chain_id("chain"), Utc::now(), ChainState::empty())
    }

    /// A new empty chain with an explicit identifier.
    ///
    /// Returns `ChainError::InvalidInput` for an empty or blank identifier.
    pub fn with_id(chain_id: impl Into<String>) -> ChainResult<Self> {
        let chain_id = chain_id.into();
        if chain_id.trim().is_empty() {
            return Err(ChainError::InvalidInput {
                reason: "chain identifier must not be empty".to_string(),
            });
        }
        Ok(Self::build(chain_id, Utc::now(), ChainState::empty()))
    }

    fn build(chain_id: String, created_at: DateTime<Utc>, state: ChainState) -> Self {
        Self {
            chain_id,
            created_at,
            state: Mutex::new(state),
        }
    }

    fn read_state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one proof record.
    ///
    /// Hashes the raw bodies into content digests, links the record to the
    /// current tail, computes its chain digest, appends it, and advances the
    /// tail. Record ids are zero-padded sequence numbers, strictly
    /// increasing within the chain.
    pub fn add_record(
        &self,
        proof_type: ProofType,
        input: impl Into<String>,
        output: impl Into<String>,
        metadata: Option<Metadata>,
    ) -> ChainResult<ProofRecord> {
        let input = input.into();
        let output = output.into();

        let mut state = self.state.lock().map_err(|e| ChainError::LockPoisoned {
            reason: format!("proof chain '{}': {}", self.chain_id, e),
        })?;

        let next_seq = state
            .next_seq
            .checked_add(1)
            .ok_or_else(|| ChainError::InvalidInput {
                reason: format!("proof chain '{}' has exhausted its record ids", self.chain_id),
            })?;

        let mut record = ProofRecord {
            id: record_id(state.next_seq),
            timestamp: Utc::now(),
            proof_type,
            input_digest: hash(&input),
            output_digest: hash(&output),
            input,
            output,
            previous_digest: state.last_digest.clone(),
            chain_digest: Digest::zero(),
            metadata: metadata.unwrap_or_default(),
        };
        record.chain_digest = hash_object(&record.link_fields())?;

        let position = state.records.len();
        state.index.insert(record.id.clone(), position);
        state.records.push(record.clone());
        state.next_seq = next_seq;
        state.last_digest = record.chain_digest.clone();

        debug!(
            chain_id = %self.chain_id,
            record_id = %record.id,
            proof_type = %record.proof_type,
            chain_digest = %record.chain_digest,
            "proof record appended"
        );

        Ok(record)
    }

    // ── Verification ──────────────────────────────────────────────────────────

    /// Verify every record of a snapshot, collecting all violations.
    pub fn verify(&self) -> VerificationReport {
        let report = verify_records(&self.records());
        if !report.valid {
            warn!(
                chain_id = %self.chain_id,
                broken = ?report.broken_links,
                first_error = report.first_error.as_deref().unwrap_or_default(),
                "proof chain failed verification"
            );
        }
        report
    }

    pub fn is_valid(&self) -> bool {
        self.verify().valid
    }

    /// Merkle root over the chain digests, in record order.
    pub fn merkle_root(&self) -> Digest {
        let digests: Vec<Digest> = self
            .read_state()
            .records
            .iter()
            .map(|r| r.chain_digest.clone())
            .collect();
        merkle_root(&digests)
    }

    // ── Export / import ───────────────────────────────────────────────────────

    /// Snapshot the chain with a verification flag computed now.
    pub fn export(&self) -> ChainExport {
        let (records, last_digest) = {
            let state = self.read_state();
            (state.records.clone(), state.last_digest.clone())
        };
        let verified = verify_records(&records).valid;

        ChainExport {
            chain_id: self.chain_id.clone(),
            created_at: self.created_at,
            record_count: records.len(),
            last_digest,
            verified,
            records,
        }
    }

    /// `export()` as pretty-printed JSON.
    pub fn export_to_json(&self) -> ChainResult<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Write `export_to_json()` to `path`, replacing any existing file.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> ChainResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.export_to_json()?)?;
        info!(chain_id = %self.chain_id, path = %path.display(), "proof chain exported");
        Ok(())
    }

    /// Parse an export document and rebuild the chain.
    ///
    /// Returns `ChainError::InvalidInput` when the document is malformed or
    /// internally inconsistent (record count, last digest, duplicate ids).
    /// A chain that merely fails verification is accepted; call `verify()`
    /// on the result to recompute its integrity.
    ///
    /// `lastDigest` is compared with the final record's stored `chainDigest`,
    /// so editing that field alone is rejected here rather than reported by
    /// `verify()`. Edits to any other field of the final record import fine.
    pub fn import_from_json(json: &str) -> ChainResult<Self> {
        let export: ChainExport =
            serde_json::from_str(json).map_err(|e| ChainError::InvalidInput {
                reason: format!("malformed chain export: {}", e),
            })?;
        Self::from_export(export)
    }

    /// Read and import an export file.
    pub fn import_from_file(path: impl AsRef<Path>) -> ChainResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::import_from_json(&json)
    }

    /// Rebuild a chain from an already parsed export document.
    pub fn from_export(export: ChainExport) -> ChainResult<Self> {
        if export.chain_id.trim().is_empty() {
            return Err(ChainError::InvalidInput {
                reason: "export has an empty chain identifier".to_string(),
            });
        }
        if export.record_count != export.records.len() {
            return Err(ChainError::InvalidInput {
                reason: format!(
                    "export declares {} records but contains {}",
                    export.record_count,
                    export.records.len()
                ),
            });
        }

        let tail = export
            .records
            .last()
            .map(|r| r.chain_digest.clone())
            .unwrap_or_else(Digest::zero);
        if tail != export.last_digest {
            return Err(ChainError::InvalidInput {
                reason: format!(
                    "export last digest {} does not match final record digest {}",
                    export.last_digest, tail
                ),
            });
        }

        let mut index = HashMap::with_capacity(export.records.len());
        for (position, record) in export.records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(ChainError::InvalidInput {
                    reason: format!("duplicate record id '{}' in export", record.id),
                });
            }
        }

        let next_seq = match export
            .records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
        {
            Some(max) => max.checked_add(1).ok_or_else(|| ChainError::InvalidInput {
                reason: format!("record id '{}' leaves no room for further records", max),
            })?,
            None => 0,
        }
        .max(export.records.len() as u64);

        let recomputed = verify_records(&export.records).valid;
        if recomputed != export.verified {
            warn!(
                chain_id = %export.chain_id,
                exported = export.verified,
                recomputed,
                "imported chain's verification flag differs from recomputed result"
            );
        }
        info!(
            chain_id = %export.chain_id,
            records = export.records.len(),
            "proof chain imported"
        );

        let state = ChainState {
            records: export.records,
            index,
            next_seq,
            last_digest: export.last_digest,
        };
        Ok(Self::build(export.chain_id, export.created_at, state))
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    pub fn record(&self, id: &str) -> Option<ProofRecord> {
        let state = self.read_state();
        state
            .index
            .get(id)
            .and_then(|&position| state.records.get(position))
            .cloned()
    }

    pub fn records_by_type(&self, proof_type: ProofType) -> Vec<ProofRecord> {
        self.read_state()
            .records
            .iter()
            .filter(|r| r.proof_type == proof_type)
            .cloned()
            .collect()
    }

    pub fn records(&self) -> Vec<ProofRecord> {
        self.read_state().records.clone()
    }

    pub fn len(&self) -> usize {
        self.read_state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_digest(&self) -> Digest {
        self.read_state().last_digest.clone()
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for ProofChain {
    fn default() -> Self {
        Self::new()
    }
}
