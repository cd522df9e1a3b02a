//! Proofchain demo CLI.
//!
//! Runs the hash-chained event log and proof ledger scenarios, or verifies
//! a previously exported proof chain.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- arithmetic
//!   cargo run -p demo -- tamper
//!   cargo run -p demo -- event-log
//!   cargo run -p demo -- verify chain.json
//!   cargo run -p demo -- --config events.toml run-all

mod context;
mod scenarios;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use proofchain_contracts::error::ChainResult;
use proofchain_ledger::ProofChain;

use context::AppContext;
use scenarios::{arithmetic, event_log, print_report, tamper};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Proofchain: tamper-evident logs and proof records over SHA-256 chains.
#[derive(Parser)]
#[command(
    name = "proofchain-demo",
    about = "Hash-chained event log and proof ledger demo",
    long_about = "Runs proofchain demo scenarios showing hash chaining, tamper\n\
                  detection, and export verification."
)]
struct Cli {
    /// Event log configuration (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// Record "2+2" = 4 and "2+2" = 5 and verify the chain.
    Arithmetic,
    /// Tamper with copies of an exported chain and show what is detected.
    Tamper,
    /// Log entries at every level, reset, and show sentinel linkage.
    EventLog,
    /// Import an exported proof chain and verify it.
    ///
    /// Exits 1 when the chain fails verification. A document that is
    /// malformed or inconsistent with itself, including one whose final
    /// record's chain digest no longer matches `lastDigest`, is rejected at
    /// import and exits 2.
    Verify {
        /// Path to a chain export (JSON).
        file: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // RUST_LOG=info shows event log entries as they are appended.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let ctx = match AppContext::new(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "failed to build application context");
            eprintln!("Startup error: {}", e);
            std::process::exit(2);
        }
    };
    debug!(
        config = ?cli.config,
        event_log = ctx.events.chain_id(),
        "application context ready"
    );

    let result = match cli.command {
        Command::RunAll => run_all(&ctx).map(|()| true),
        Command::Arithmetic => arithmetic::run_scenario(&ctx).map(|()| true),
        Command::Tamper => tamper::run_scenario(&ctx).map(|()| true),
        Command::EventLog => event_log::run_scenario(&ctx).map(|()| true),
        Command::Verify { file } => verify_file(&file),
    };

    ctx.shutdown();

    match result {
        Ok(true) => {}
        Ok(false) => {
            debug!("verification failed");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(2);
        }
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn run_all(ctx: &AppContext) -> ChainResult<()> {
    print_banner();
    arithmetic::run_scenario(ctx)?;
    tamper::run_scenario(ctx)?;
    event_log::run_scenario(ctx)?;

    let reports = ctx.ledger.verify_all();
    let valid = reports.values().filter(|r| r.valid).count();
    println!(
        "Ledger: {} chain(s), {} valid, Merkle root {}",
        reports.len(),
        valid,
        ctx.ledger.merkle_root()
    );
    println!("All scenarios completed.");
    Ok(())
}

/// Returns `Ok(false)` when the file parses but the chain does not verify.
fn verify_file(path: &Path) -> ChainResult<bool> {
    let chain = ProofChain::import_from_file(path)?;
    println!("=== Verify {} ===", path.display());
    println!();
    println!("  Chain:                  {}", chain.chain_id());
    println!("  Created:                {}", chain.created_at().to_rfc3339());

    let report = chain.verify();
    print_report(&report);
    println!();
    Ok(report.valid)
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Proofchain: tamper-evident records over SHA-256");
    println!("===============================================");
    println!();
    println!("Per append:");
    println!("  [1] Content is hashed (canonical JSON for structured data)");
    println!("  [2] The new element embeds the previous element's digest");
    println!("  [3] Verification replays every digest and reports each break");
    println!();
}
