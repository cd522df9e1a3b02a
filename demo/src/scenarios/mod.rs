pub mod arithmetic;
pub mod event_log;
pub mod tamper;

use proofchain_contracts::report::VerificationReport;

/// Print a verification report in the demo's two-column layout.
pub fn print_report(report: &VerificationReport) {
    println!(
        "  Verification:           {}",
        if report.valid { "VALID" } else { "INVALID" }
    );
    println!(
        "  Records:                {} total, {} valid, {} invalid",
        report.total_records, report.valid_records, report.invalid_records
    );
    if !report.broken_links.is_empty() {
        println!("  Broken at positions:    {:?}", report.broken_links);
    }
    for violation in &report.violations {
        println!("    - {}", violation);
    }
}
