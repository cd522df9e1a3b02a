//! # proofchain-ledger
//!
//! Named chains of typed proof records.
//!
//! ## Overview
//!
//! A [`ProofChain`] records (input, output) pairs such as a formula and its
//! evaluation. Each record stores content digests of its raw bodies and a
//! chain digest over its link fields, the latter including the previous
//! record's chain digest. [`ProofChain::verify`] checks links, chain digests,
//! and content digests independently and reports every failing record.
//!
//! A [`ProofLedger`] holds any number of chains by identifier and can verify
//! them all or summarize them with a single Merkle root.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proofchain_contracts::ProofType;
//! use proofchain_ledger::ProofLedger;
//!
//! let ledger = ProofLedger::new();
//! let chain = ledger.create_chain(Some("arithmetic".into()))?;
//! chain.add_record(ProofType::Computation, "2+2", "4", None)?;
//! assert!(chain.verify().valid);
//! ```

pub mod chain;
pub mod ledger;
pub mod verify;

pub use chain::ProofChain;
pub use ledger::ProofLedger;
pub use verify::{chain_digest, verify_records};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use serde_json::json;

    use proofchain_contracts::{
        digest::ZERO_DIGEST,
        error::ChainError,
        record::{Metadata, ProofType},
        report::ViolationKind,
    };
    use proofchain_hash::{hash, merkle_root};

    use super::{ProofChain, ProofLedger};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn chain_with(n: usize) -> ProofChain {
        let chain = ProofChain::with_id("test-chain").unwrap();
        for i in 0..n {
            chain
                .add_record(
                    ProofType::Computation,
                    format!("{i}+{i}"),
                    format!("{}", i + i),
                    None,
                )
                .unwrap();
        }
        chain
    }

    // ── Append & link ─────────────────────────────────────────────────────────

    #[test]
    fn test_untampered_chain_verifies() {
        let chain = chain_with(10);
        let report = chain.verify();
        assert!(report.valid);
        assert_eq!(report.total_records, 10);
        assert_eq!(report.valid_records, 10);
        assert_eq!(report.invalid_records, 0);
        assert!(report.broken_links.is_empty());
        assert!(report.first_error.is_none());
    }

    #[test]
    fn test_records_link_to_predecessor() {
        let chain = chain_with(4);
        let records = chain.records();

        assert_eq!(records[0].previous_digest.as_str(), ZERO_DIGEST);
        for pair in records.windows(2) {
            assert_eq!(pair[1].previous_digest, pair[0].chain_digest);
        }
        assert_eq!(chain.last_digest(), records[3].chain_digest);
    }

    #[test]
    fn test_record_ids_are_sequential() {
        let chain = chain_with(3);
        let ids: Vec<String> = chain.records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["000000", "000001", "000002"]);
    }

    #[test]
    fn test_empty_chain() {
        let chain = ProofChain::new();
        assert!(chain.is_empty());
        assert!(chain.chain_id().starts_with("chain-"));
        assert_eq!(chain.last_digest().as_str(), ZERO_DIGEST);
        assert!(chain.is_valid());
        assert_eq!(chain.merkle_root(), hash(""));
    }

    #[test]
    fn test_blank_chain_id_rejected() {
        assert!(matches!(
            ProofChain::with_id("  "),
            Err(ChainError::InvalidInput { .. })
        ));
    }

    // ── Content vs. correctness ───────────────────────────────────────────────

    #[test]
    fn test_wrong_answers_still_verify() {
        let chain = ProofChain::new();
        chain
            .add_record(ProofType::Computation, "2+2", "4", None)
            .unwrap();
        let wrong = chain
            .add_record(ProofType::Computation, "2+2", "5", None)
            .unwrap();

        assert!(chain.verify().valid, "integrity, not correctness, is checked");
        assert_eq!(hash("5"), wrong.output_digest);
        assert_eq!(hash("2+2"), wrong.input_digest);
    }

    // ── Tamper detection ──────────────────────────────────────────────────────

    #[test]
    fn test_output_tamper_fails_only_content_check() {
        let chain = chain_with(3);
        chain.state.lock().unwrap().records[1].output = "999".to_string();

        let report = chain.verify();
        assert!(!report.valid);
        assert_eq!(report.broken_links, vec![1]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].kind,
            ViolationKind::OutputDigestMismatch
        );
    }

    #[test]
    fn test_input_tamper_detected() {
        let chain = chain_with(3);
        chain.state.lock().unwrap().records[2].input = "1+1".to_string();

        let report = chain.verify();
        assert_eq!(report.broken_links, vec![2]);
        assert_eq!(report.violations[0].kind, ViolationKind::InputDigestMismatch);
    }

    #[test]
    fn test_type_tamper_breaks_chain_digest() {
        let chain = chain_with(3);
        chain.state.lock().unwrap().records[0].proof_type = ProofType::Axiom;

        let report = chain.verify();
        assert_eq!(report.broken_links, vec![0]);
        assert_eq!(report.violations[0].kind, ViolationKind::DigestMismatch);
    }

    #[test]
    fn test_relinked_record_detected() {
        let chain = chain_with(4);
        {
            let mut state = chain.state.lock().unwrap();
            // Re-derive record 2's chain digest after pointing it elsewhere,
            // so only the link check can catch it.
            state.records[2].previous_digest = hash("forged");
            let forged = super::chain_digest(&state.records[2]);
            state.records[2].chain_digest = forged;
        }

        let report = chain.verify();
        assert!(!report.valid);
        // Record 2 links to the wrong predecessor; record 3 now links to a
        // chain digest that no longer matches record 2's.
        assert_eq!(report.broken_links, vec![2, 3]);
        assert!(report
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::BrokenLink));
    }

    #[test]
    fn test_reordering_detected() {
        let chain = chain_with(4);
        chain.state.lock().unwrap().records.swap(0, 1);

        let report = chain.verify();
        assert!(!report.valid);
        assert!(report.broken_links.contains(&0));
        assert!(report.broken_links.contains(&1));
    }

    #[test]
    fn test_metadata_is_not_covered() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), json!("calculator"));
        let chain = ProofChain::new();
        chain
            .add_record(ProofType::Formula, "E=mc^2", "ok", Some(metadata))
            .unwrap();

        chain.state.lock().unwrap().records[0]
            .metadata
            .insert("note".to_string(), json!("added later"));

        assert!(chain.verify().valid);
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    #[test]
    fn test_lookup_by_id_and_type() {
        let chain = ProofChain::new();
        chain
            .add_record(ProofType::Axiom, "a = a", "true", None)
            .unwrap();
        chain
            .add_record(ProofType::Theorem, "a + 0 = a", "proved", None)
            .unwrap();
        chain
            .add_record(ProofType::Axiom, "a + b = b + a", "true", None)
            .unwrap();

        let second = chain.record("000001").unwrap();
        assert_eq!(second.proof_type, ProofType::Theorem);
        assert!(chain.record("000009").is_none());

        let axioms = chain.records_by_type(ProofType::Axiom);
        assert_eq!(axioms.len(), 2);
        assert!(chain.records_by_type(ProofType::Integration).is_empty());
    }

    #[test]
    fn test_merkle_root_over_chain_digests() {
        let chain = chain_with(3);
        let digests: Vec<_> = chain
            .records()
            .into_iter()
            .map(|r| r.chain_digest)
            .collect();
        assert_eq!(chain.merkle_root(), merkle_root(&digests));
    }

    // ── Export / import ───────────────────────────────────────────────────────

    #[test]
    fn test_export_document_shape() {
        let chain = chain_with(2);
        let value: serde_json::Value =
            serde_json::from_str(&chain.export_to_json().unwrap()).unwrap();

        assert_eq!(value["chainId"], "test-chain");
        assert_eq!(value["recordCount"], 2);
        assert_eq!(value["verified"], true);
        assert_eq!(value["lastDigest"], chain.last_digest().as_str());
        assert_eq!(value["records"][0]["type"], "COMPUTATION");
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_round_trip_preserves_verification() {
        let chain = chain_with(5);
        let imported = ProofChain::import_from_json(&chain.export_to_json().unwrap()).unwrap();

        assert_eq!(imported.chain_id(), chain.chain_id());
        assert_eq!(imported.created_at(), chain.created_at());
        assert_eq!(imported.records(), chain.records());
        assert_eq!(imported.verify(), chain.verify());
    }

    #[test]
    fn test_round_trip_of_tampered_chain() {
        let chain = chain_with(3);
        chain.state.lock().unwrap().records[1].output = "tampered".to_string();

        let json = chain.export_to_json().unwrap();
        let export: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(export["verified"], false);

        let imported = ProofChain::import_from_json(&json).unwrap();
        assert_eq!(imported.verify(), chain.verify());
        assert!(!imported.verify().valid);
    }

    #[test]
    fn test_imported_chain_keeps_appending() {
        let chain = chain_with(2);
        let imported = ProofChain::import_from_json(&chain.export_to_json().unwrap()).unwrap();

        let next = imported
            .add_record(ProofType::Validation, "check", "pass", None)
            .unwrap();
        assert_eq!(next.id, "000002");
        assert_eq!(next.previous_digest, chain.last_digest());
        assert!(imported.is_valid());
    }

    #[test]
    fn test_import_rejects_malformed_documents() {
        assert!(matches!(
            ProofChain::import_from_json("{ not json"),
            Err(ChainError::InvalidInput { .. })
        ));

        let chain = chain_with(2);
        let mut doc: serde_json::Value =
            serde_json::from_str(&chain.export_to_json().unwrap()).unwrap();

        let mut wrong_count = doc.clone();
        wrong_count["recordCount"] = json!(5);
        assert!(matches!(
            ProofChain::import_from_json(&wrong_count.to_string()),
            Err(ChainError::InvalidInput { .. })
        ));

        let mut wrong_tail = doc.clone();
        wrong_tail["lastDigest"] = json!(hash("elsewhere").as_str());
        assert!(matches!(
            ProofChain::import_from_json(&wrong_tail.to_string()),
            Err(ChainError::InvalidInput { .. })
        ));

        let mut bad_digest = doc.clone();
        bad_digest["records"][0]["inputDigest"] = json!("XYZ");
        assert!(matches!(
            ProofChain::import_from_json(&bad_digest.to_string()),
            Err(ChainError::InvalidInput { .. })
        ));

        doc["records"][1]["id"] = json!("000000");
        assert!(matches!(
            ProofChain::import_from_json(&doc.to_string()),
            Err(ChainError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_tail_tamper_rejected_only_when_chain_digest_edited() {
        let chain = chain_with(3);

        let mut body_edit = chain.export();
        body_edit.records[2].output = "tampered".to_string();
        let imported =
            ProofChain::import_from_json(&serde_json::to_string(&body_edit).unwrap()).unwrap();
        assert_eq!(imported.verify().broken_links, vec![2]);

        let mut digest_edit = chain.export();
        digest_edit.records[2].chain_digest = hash("tampered");
        assert!(matches!(
            ProofChain::import_from_json(&serde_json::to_string(&digest_edit).unwrap()),
            Err(ChainError::InvalidInput { .. })
        ));
    }

    fn export_with_last_id(id: u64) -> String {
        let mut export = chain_with(1).export();
        export.records[0].id = id.to_string();
        export.records[0].chain_digest = super::chain_digest(&export.records[0]);
        export.last_digest = export.records[0].chain_digest.clone();
        serde_json::to_string(&export).unwrap()
    }

    #[test]
    fn test_import_rejects_exhausted_record_ids() {
        let json = export_with_last_id(u64::MAX);
        assert!(matches!(
            ProofChain::import_from_json(&json),
            Err(ChainError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_append_fails_once_record_ids_run_out() {
        let chain = ProofChain::import_from_json(&export_with_last_id(u64::MAX - 1)).unwrap();
        assert!(chain.is_valid());

        let err = chain
            .add_record(ProofType::Computation, "1+1", "2", None)
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::InvalidInput { .. }));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_export_to_file_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        let chain = chain_with(3);

        chain.export_to_file(&path).unwrap();
        let imported = ProofChain::import_from_file(&path).unwrap();
        assert_eq!(imported.verify(), chain.verify());
        assert_eq!(imported.merkle_root(), chain.merkle_root());
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    #[test]
    fn test_concurrent_appends_keep_chain_valid() {
        let chain = Arc::new(ProofChain::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let chain = Arc::clone(&chain);
                thread::spawn(move || {
                    for i in 0..25 {
                        chain
                            .add_record(
                                ProofType::Computation,
                                format!("{t}*{i}"),
                                format!("{}", t * i),
                                None,
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(chain.len(), 200);
        assert!(chain.is_valid());
        let mut ids: Vec<String> = chain.records().into_iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 200, "ids are unique");
    }

    // ── Ledger ────────────────────────────────────────────────────────────────

    #[test]
    fn test_ledger_rejects_duplicate_chain_id() {
        let ledger = ProofLedger::new();
        ledger.create_chain(Some("physics".to_string())).unwrap();

        let err = ledger
            .create_chain(Some("physics".to_string()))
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::DuplicateChainId { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_ledger_chains_are_independent() {
        let ledger = ProofLedger::new();
        let a = ledger.create_chain(Some("a".to_string())).unwrap();
        let b = ledger.create_chain(None).unwrap();

        a.add_record(ProofType::Formula, "x", "y", None).unwrap();
        a.add_record(ProofType::Formula, "y", "z", None).unwrap();
        b.add_record(ProofType::Axiom, "p", "p", None).unwrap();

        assert_eq!(ledger.chain("a").unwrap().len(), 2);
        assert_eq!(b.records()[0].previous_digest.as_str(), ZERO_DIGEST);

        a.state.lock().unwrap().records[0].input = "tampered".to_string();
        let reports = ledger.verify_all();
        assert_eq!(reports.len(), 2);
        assert!(!reports["a"].valid);
        assert!(reports[b.chain_id()].valid);
    }

    #[test]
    fn test_ledger_merkle_root_and_register() {
        let ledger = ProofLedger::new();
        let first = ledger.create_chain(Some("first".to_string())).unwrap();
        first
            .add_record(ProofType::Integration, "f(x)", "F(x)", None)
            .unwrap();

        let imported = ProofChain::import_from_json(&chain_with(2).export_to_json().unwrap())
            .unwrap();
        let second = ledger.register(imported).unwrap();

        assert_eq!(ledger.chain_ids(), vec!["first", "test-chain"]);
        assert_eq!(
            ledger.merkle_root(),
            merkle_root(&[first.last_digest(), second.last_digest()])
        );

        let duplicate = ProofChain::with_id("first").unwrap();
        assert!(matches!(
            ledger.register(duplicate),
            Err(ChainError::DuplicateChainId { .. })
        ));
    }
}
