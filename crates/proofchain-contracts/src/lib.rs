//! # proofchain-contracts
//!
//! Shared types for the proofchain workspace.
//!
//! All crates in the workspace import from here. No hashing or chaining
//! logic lives in this crate, only data definitions, wire formats, and the
//! error type.

pub mod digest;
pub mod entry;
pub mod error;
pub mod export;
pub mod id;
pub mod record;
pub mod report;

pub use digest::{Digest, ZERO_DIGEST};
pub use entry::{LogEntry, LogLevel, Payload};
pub use error::{ChainError, ChainResult};
pub use export::{ChainExport, EventLogExport};
pub use id::generate_chain_id;
pub use record::{Metadata, ProofRecord, ProofType};
pub use report::{IntegrityViolation, VerificationReport, ViolationKind};

#[cfg(test)]
mod tests {
    use super::*;

    // ── Digest ───────────────────────────────────────────────────────────────

    #[test]
    fn zero_digest_is_64_zeros() {
        assert_eq!(ZERO_DIGEST.len(), 64);
        assert!(ZERO_DIGEST.chars().all(|c| c == '0'));
        assert!(Digest::zero().is_zero());
        assert_eq!(Digest::default(), Digest::zero());
    }

    #[test]
    fn digest_parse_rejects_bad_text() {
        assert!(Digest::parse("abc").is_err());
        assert!(Digest::parse("G".repeat(64)).is_err());
        // Upper-case hex is not the external representation.
        assert!(Digest::parse("A".repeat(64)).is_err());
        assert!(Digest::parse("a".repeat(64)).is_ok());
    }

    #[test]
    fn digest_serializes_as_bare_string() {
        let d = Digest::from_bytes(&[0xab; 32]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));

        let decoded: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, d);

        let bad: Result<Digest, _> = serde_json::from_str("\"not-a-digest\"");
        assert!(bad.is_err());
    }

    // ── LogLevel ─────────────────────────────────────────────────────────────

    #[test]
    fn log_levels_are_ordered_numerically() {
        let values: Vec<u8> = LogLevel::ALL.iter().map(|l| l.as_u8()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Proof);
        assert!(LogLevel::Proof < LogLevel::Validation);
    }

    #[test]
    fn log_level_wire_values() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
        assert_eq!(
            serde_json::to_string(&LogLevel::Validation).unwrap(),
            "\"VALIDATION\""
        );
        assert_eq!("proof".parse::<LogLevel>().unwrap(), LogLevel::Proof);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    // ── ProofType ────────────────────────────────────────────────────────────

    #[test]
    fn proof_type_wire_values() {
        let names: Vec<String> = ProofType::ALL
            .iter()
            .map(|t| serde_json::to_string(t).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "\"FORMULA\"",
                "\"THEOREM\"",
                "\"COMPUTATION\"",
                "\"AXIOM\"",
                "\"VALIDATION\"",
                "\"INTEGRATION\""
            ]
        );
    }

    #[test]
    fn record_ids_are_zero_padded() {
        assert_eq!(record::record_id(0), "000000");
        assert_eq!(record::record_id(42), "000042");
        assert!(record::record_id(9) < record::record_id(10));
    }

    #[test]
    fn proof_record_uses_type_key() {
        let record = ProofRecord {
            id: record::record_id(0),
            timestamp: chrono::Utc::now(),
            proof_type: ProofType::Axiom,
            input: "a".to_string(),
            output: "a".to_string(),
            input_digest: Digest::zero(),
            output_digest: Digest::zero(),
            previous_digest: Digest::zero(),
            chain_digest: Digest::zero(),
            metadata: Metadata::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "AXIOM");
        assert!(value.get("inputDigest").is_some());
        assert!(value.get("metadata").is_none(), "empty metadata is omitted");
    }

    // ── VerificationReport ───────────────────────────────────────────────────

    #[test]
    fn report_from_no_violations_is_valid() {
        let report = VerificationReport::from_violations(4, Vec::new());
        assert!(report.valid);
        assert_eq!(report.valid_records, 4);
        assert_eq!(report.invalid_records, 0);
        assert!(report.broken_links.is_empty());
        assert!(report.first_error.is_none());
    }

    #[test]
    fn report_dedups_indices() {
        let v = |index, kind| IntegrityViolation {
            index,
            kind,
            expected: Digest::zero(),
            actual: Digest::from_bytes(&[1; 32]),
        };
        let report = VerificationReport::from_violations(
            5,
            vec![
                v(3, ViolationKind::DigestMismatch),
                v(1, ViolationKind::OutputDigestMismatch),
                v(3, ViolationKind::BrokenLink),
            ],
        );
        assert!(!report.valid);
        assert_eq!(report.broken_links, vec![1, 3]);
        assert_eq!(report.invalid_records, 2);
        assert_eq!(report.valid_records, 3);
        assert!(report.first_error.unwrap().contains("position 3"));
    }

    // ── Chain ids ────────────────────────────────────────────────────────────

    #[test]
    fn generated_chain_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| generate_chain_id("chain")).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.starts_with("chain-")));
    }

    // ── ChainError display messages ──────────────────────────────────────────

    #[test]
    fn error_duplicate_chain_id_display() {
        let err = ChainError::DuplicateChainId {
            chain_id: "physics".to_string(),
        };
        assert!(err.to_string().contains("physics"));
    }

    #[test]
    fn error_sink_failure_display() {
        let err = ChainError::SinkFailure {
            sink: "file".to_string(),
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("file"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn error_from_serde_json() {
        let err: ChainError = serde_json::from_str::<Digest>("{").unwrap_err().into();
        assert!(matches!(err, ChainError::Serialization { .. }));
    }
}
