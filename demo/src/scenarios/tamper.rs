//! Scenario: tamper detection.
//!
//! Builds a chain, edits a copy of its export in three different ways, and
//! shows which check catches each edit.

use serde_json::json;

use proofchain_contracts::{
    entry::Payload,
    error::ChainResult,
    export::ChainExport,
    record::ProofType,
};
use proofchain_hash::hash;
use proofchain_ledger::ProofChain;

use crate::context::AppContext;
use crate::scenarios::print_report;

fn show(ctx: &AppContext, title: &str, export: ChainExport) -> ChainResult<()> {
    let copy = ProofChain::from_export(export)?;
    let report = copy.verify();

    println!("  -- {} --", title);
    print_report(&report);
    println!();

    ctx.events.validation(
        format!("tamper check: {}", title),
        Payload::new(json!({
            "valid": report.valid,
            "brokenLinks": report.broken_links,
        })),
    )?;
    Ok(())
}

pub fn run_scenario(ctx: &AppContext) -> ChainResult<()> {
    println!("=== Scenario: Tamper Detection ===");
    println!();

    let chain = ctx.ledger.create_chain(None)?;
    chain.add_record(ProofType::Axiom, "a + 0 = a", "true", None)?;
    chain.add_record(ProofType::Theorem, "a + b = b + a", "proved", None)?;
    chain.add_record(ProofType::Integration, "integral of 2x dx", "x^2 + C", None)?;
    chain.add_record(ProofType::Validation, "x^2 + C", "checked", None)?;
    println!(
        "  Chain {} with {} records",
        chain.chain_id(),
        chain.len()
    );
    println!();

    show(ctx, "original", chain.export())?;

    let mut edited_body = chain.export();
    edited_body.records[1].output = "disproved".to_string();
    show(ctx, "output body edited", edited_body)?;

    let mut relinked = chain.export();
    relinked.records[2].previous_digest = hash("somewhere else");
    show(ctx, "record relinked", relinked)?;

    let mut reordered = chain.export();
    reordered.records.swap(0, 1);
    show(ctx, "records reordered", reordered)?;

    println!("  Tamper scenario complete.");
    println!();
    Ok(())
}
