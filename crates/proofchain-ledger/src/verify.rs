//! Proof chain verification.
//!
//! Three independent checks run on every record:
//!
//! 1. **Link** : `previous_digest` equals the preceding record's
//!    `chain_digest` (zero sentinel for record 0).
//! 2. **Chain digest** : `chain_digest` re-derives from
//!    `ProofRecord::link_fields()`.
//! 3. **Content** : `input_digest` and `output_digest` re-derive from the
//!    raw `input` and `output` bodies.
//!
//! A record whose body was edited fails (3) while still passing (1) and (2),
//! which separates content tampering from structural tampering.

use proofchain_contracts::{
    digest::Digest,
    record::ProofRecord,
    report::{IntegrityViolation, VerificationReport, ViolationKind},
};
use proofchain_hash::{compare_hashes, hash, hash_object};

fn check(
    violations: &mut Vec<IntegrityViolation>,
    index: usize,
    kind: ViolationKind,
    expected: Digest,
    actual: &Digest,
) {
    if !compare_hashes(expected.as_str(), actual.as_str()) {
        violations.push(IntegrityViolation {
            index,
            kind,
            expected,
            actual: actual.clone(),
        });
    }
}

/// Compute the chain digest a record should carry.
pub fn chain_digest(record: &ProofRecord) -> Digest {
    // Link fields are strings, digests, and a timestamp; they always serialize.
    hash_object(&record.link_fields()).unwrap_or_else(|_| Digest::zero())
}

/// Verify an ordered slice of records in one pass. An empty slice is valid.
pub fn verify_records(records: &[ProofRecord]) -> VerificationReport {
    let mut violations = Vec::new();
    let mut expected_prev = Digest::zero();

    for (index, record) in records.iter().enumerate() {
        check(
            &mut violations,
            index,
            ViolationKind::BrokenLink,
            expected_prev,
            &record.previous_digest,
        );
        check(
            &mut violations,
            index,
            ViolationKind::DigestMismatch,
            chain_digest(record),
            &record.chain_digest,
        );
        check(
            &mut violations,
            index,
            ViolationKind::InputDigestMismatch,
            hash(&record.input),
            &record.input_digest,
        );
        check(
            &mut violations,
            index,
            ViolationKind::OutputDigestMismatch,
            hash(&record.output),
            &record.output_digest,
        );

        expected_prev = record.chain_digest.clone();
    }

    VerificationReport::from_violations(records.len(), violations)
}
