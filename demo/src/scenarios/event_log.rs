//! Scenario: the event log.
//!
//! Logs at every level, shows the chain links, resets, and shows that the
//! first entry after a reset links to the zero sentinel again.

use serde_json::json;

use proofchain_contracts::{
    digest::ZERO_DIGEST,
    entry::{LogLevel, Payload},
    error::ChainResult,
};

use crate::context::AppContext;

pub fn run_scenario(ctx: &AppContext) -> ChainResult<()> {
    println!("=== Scenario: Event Log ===");
    println!();

    let log = &ctx.events;
    log.reset();

    log.debug("warming up")?;
    log.info("scenario started")?;
    log.warn("cache miss")?;
    log.error("retrying upstream call")?;
    log.proof("theorem stored", Payload::new(json!({ "theorem": "a + b = b + a" })))?;
    log.validation("result checked", Payload::new(json!({ "ok": true })))?;

    println!("  Log:                    {}", log.chain_id());
    println!("  Minimum level shown:    {}", log.min_level());
    for entry in log.entries() {
        println!(
            "  #{} {:<10} {:<24} {} <- {}",
            entry.id,
            entry.level.to_string(),
            entry.message,
            &entry.digest.as_str()[..12],
            &entry.previous_digest.as_str()[..12],
        );
    }
    println!(
        "  PROOF entries:          {}",
        log.entries_at_level(LogLevel::Proof).len()
    );

    let report = log.verify();
    println!(
        "  Chain integrity:        {} ({} entries)",
        if report.valid { "VERIFIED" } else { "FAILED" },
        report.total_records
    );
    println!();

    log.reset();
    let first = log.info("after reset")?;
    println!(
        "  After reset, entry #{} links to sentinel: {}",
        first.id,
        if first.previous_digest.as_str() == ZERO_DIGEST {
            "YES"
        } else {
            "NO"
        }
    );
    log.flush();

    println!();
    println!("  Event log scenario complete.");
    println!();
    Ok(())
}
