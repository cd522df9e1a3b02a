//! Verification report types.
//!
//! Verification never stops at the first problem. Every violation found in
//! a pass is collected so batch tooling can enumerate all breaks at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::Digest;

/// Which check a violation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The stored previous digest does not match the preceding element.
    BrokenLink,
    /// The stored digest does not re-derive from the element's fields.
    DigestMismatch,
    /// A record's input body no longer hashes to its input digest.
    InputDigestMismatch,
    /// A record's output body no longer hashes to its output digest.
    OutputDigestMismatch,
}

impl ViolationKind {
    pub fn describe(self) -> &'static str {
        match self {
            ViolationKind::BrokenLink => "broken link",
            ViolationKind::DigestMismatch => "digest mismatch",
            ViolationKind::InputDigestMismatch => "input digest mismatch",
            ViolationKind::OutputDigestMismatch => "output digest mismatch",
        }
    }
}

/// A single integrity failure at one position in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    /// Zero-based position of the offending element.
    pub index: usize,
    pub kind: ViolationKind,
    /// The value verification derived.
    pub expected: Digest,
    /// The value stored in the element.
    pub actual: Digest,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {}: {} (expected {}, found {})",
            self.index,
            self.kind.describe(),
            self.expected,
            self.actual
        )
    }
}

/// The result of verifying a whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// True only if no violation was found.
    pub valid: bool,
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    /// Ascending, de-duplicated positions with at least one violation.
    pub broken_links: Vec<usize>,
    /// Rendering of the first violation, if any.
    pub first_error: Option<String>,
    /// Every violation in the order found.
    pub violations: Vec<IntegrityViolation>,
}

impl VerificationReport {
    /// Summarize the violations found while scanning `total` elements.
    pub fn from_violations(total: usize, violations: Vec<IntegrityViolation>) -> Self {
        let mut broken_links: Vec<usize> = violations.iter().map(|v| v.index).collect();
        broken_links.sort_unstable();
        broken_links.dedup();

        let invalid_records = broken_links.len();
        Self {
            valid: violations.is_empty(),
            total_records: total,
            valid_records: total - invalid_records,
            invalid_records,
            broken_links,
            first_error: violations.first().map(|v| v.to_string()),
            violations,
        }
    }
}
