//! Merkle-root folding over ordered digest lists.
//!
//! Each level pairs adjacent digests as `hash(left_hex + right_hex)`. An odd
//! level duplicates its last digest. Order matters: the root is not
//! commutative in its inputs.

use serde::{Deserialize, Serialize};

use proofchain_contracts::digest::Digest;

use crate::hashing::hash;

fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut joined = String::with_capacity(left.as_str().len() + right.as_str().len());
    joined.push_str(left.as_str());
    joined.push_str(right.as_str());
    hash(joined)
}

fn next_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Fold `digests` into a single root.
///
/// - `[]` → `hash("")`
/// - `[a]` → `a`
/// - `[a, b]` → `hash(a + b)`
pub fn merkle_root(digests: &[Digest]) -> Digest {
    let mut level = match digests {
        [] => return hash(""),
        [single] => return single.clone(),
        _ => next_level(digests),
    };
    while level.len() > 1 {
        level = next_level(&level);
    }
    level.pop().unwrap_or_else(|| hash(""))
}

/// Which side a sibling sits on in an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: Digest,
    pub side: Side,
}

/// Sibling path from the leaf at `index` up to the root.
///
/// Returns `None` when `index` is out of range. A single-leaf list has an
/// empty path.
pub fn merkle_proof(digests: &[Digest], index: usize) -> Option<Vec<ProofStep>> {
    if index >= digests.len() {
        return None;
    }

    let mut steps = Vec::new();
    let mut level = digests.to_vec();
    let mut position = index;

    while level.len() > 1 {
        let step = if position % 2 == 0 {
            // Odd tail pairs with itself.
            let sibling = level.get(position + 1).unwrap_or(&level[position]);
            ProofStep {
                sibling: sibling.clone(),
                side: Side::Right,
            }
        } else {
            ProofStep {
                sibling: level[position - 1].clone(),
                side: Side::Left,
            }
        };
        steps.push(step);
        level = next_level(&level);
        position /= 2;
    }

    Some(steps)
}

/// Check that `leaf` plus `proof` folds to `root`.
pub fn verify_merkle_proof(leaf: &Digest, proof: &[ProofStep], root: &Digest) -> bool {
    let folded = proof.iter().fold(leaf.clone(), |acc, step| match step.side {
        Side::Left => hash_pair(&step.sibling, &acc),
        Side::Right => hash_pair(&acc, &step.sibling),
    });
    crate::hashing::compare_hashes(folded.as_str(), root.as_str())
}
