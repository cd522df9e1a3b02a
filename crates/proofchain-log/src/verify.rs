//! Event log chain verification.
//!
//! Replays entries from the zero sentinel and checks, for every entry:
//!
//! 1. **Link** : `previous_digest` equals the stored `digest` of the
//!    preceding entry (or the sentinel for entry 0).
//! 2. **Content** : `digest` equals the digest recomputed from
//!    `LogEntry::content()`.
//!
//! Every violation is collected; scanning never stops early.

use proofchain_contracts::{
    digest::Digest,
    entry::LogEntry,
    report::{IntegrityViolation, VerificationReport, ViolationKind},
};
use proofchain_hash::{compare_hashes, hash_object};

/// Verify an ordered slice of entries. An empty slice is valid.
pub fn verify_entries(entries: &[LogEntry]) -> VerificationReport {
    let mut violations = Vec::new();
    let mut expected_prev = Digest::zero();

    for (index, entry) in entries.iter().enumerate() {
        if !compare_hashes(entry.previous_digest.as_str(), expected_prev.as_str()) {
            violations.push(IntegrityViolation {
                index,
                kind: ViolationKind::BrokenLink,
                expected: expected_prev.clone(),
                actual: entry.previous_digest.clone(),
            });
        }

        // An unserializable entry counts as a mismatch.
        let recomputed = hash_object(&entry.content()).unwrap_or_else(|_| Digest::zero());
        if !compare_hashes(entry.digest.as_str(), recomputed.as_str()) {
            violations.push(IntegrityViolation {
                index,
                kind: ViolationKind::DigestMismatch,
                expected: recomputed,
                actual: entry.digest.clone(),
            });
        }

        expected_prev = entry.digest.clone();
    }

    VerificationReport::from_violations(entries.len(), violations)
}
