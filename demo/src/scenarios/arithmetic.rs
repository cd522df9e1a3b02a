//! Scenario: arithmetic proofs.
//!
//! Records "2+2" evaluated to "4" and to "5" on a fresh chain. Both records
//! verify: the ledger proves what was recorded, not that it is correct.

use serde_json::json;

use proofchain_contracts::{
    entry::Payload,
    error::ChainResult,
    record::{Metadata, ProofType},
};
use proofchain_hash::{compare_hashes, hash};

use crate::context::AppContext;
use crate::scenarios::print_report;

pub fn run_scenario(ctx: &AppContext) -> ChainResult<()> {
    println!("=== Scenario: Arithmetic Proofs ===");
    println!();

    let chain = ctx.ledger.create_chain(None)?;
    println!("  Chain:                  {}", chain.chain_id());

    let mut metadata = Metadata::new();
    metadata.insert("evaluator".to_string(), json!("demo"));

    let right = chain.add_record(ProofType::Computation, "2+2", "4", Some(metadata))?;
    let wrong = chain.add_record(ProofType::Computation, "2+2", "5", None)?;

    for record in [&right, &wrong] {
        println!(
            "  Record {}:          {} = {}  chain digest {}",
            record.id, record.input, record.output, record.chain_digest
        );
        ctx.events.proof(
            "computation recorded",
            Payload::new(json!({
                "chainId": chain.chain_id(),
                "recordId": record.id,
                "outputDigest": record.output_digest,
            })),
        )?;
    }
    println!();

    let report = chain.verify();
    print_report(&report);

    let rehashed = hash("5");
    println!(
        "  hash(\"5\") reproduces:   {}",
        if compare_hashes(rehashed.as_str(), wrong.output_digest.as_str()) {
            "YES"
        } else {
            "NO"
        }
    );
    println!("  Merkle root:            {}", chain.merkle_root());

    ctx.events.validation(
        "arithmetic chain verified",
        Payload::new(json!({ "chainId": chain.chain_id(), "valid": report.valid })),
    )?;

    println!();
    println!("  Arithmetic scenario complete.");
    println!();
    Ok(())
}
