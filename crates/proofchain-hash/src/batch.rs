//! Batch digest verification.

use serde::{Deserialize, Serialize};

use proofchain_contracts::digest::Digest;

use crate::hashing::{compare_hashes, hash};

/// One (input, expected digest) pair to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub input: String,
    /// Expected digest text. Malformed text simply fails to match.
    pub expected: String,
}

impl BatchItem {
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub index: usize,
    pub valid: bool,
    /// The digest actually computed for the input.
    pub actual: Digest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// True when every item matched. An empty batch is valid.
    pub all_valid: bool,
    pub results: Vec<BatchItemResult>,
}

/// Verify every item independently. Never short-circuits.
pub fn batch_verify(items: &[BatchItem]) -> BatchReport {
    let results: Vec<BatchItemResult> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let actual = hash(&item.input);
            BatchItemResult {
                index,
                valid: compare_hashes(actual.as_str(), &item.expected),
                actual,
            }
        })
        .collect();

    BatchReport {
        all_valid: results.iter().all(|r| r.valid),
        results,
    }
}
