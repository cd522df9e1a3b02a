//! # proofchain-hash
//!
//! Stateless SHA-256 helpers shared by the event log and the proof ledger.
//!
//! ## Overview
//!
//! - [`hash`], [`hash_with_timestamp`], [`hash_object`] produce 64-character
//!   lowercase hex digests.
//! - [`compare_hashes`] compares digests in constant time.
//! - [`merkle_root`] folds an ordered digest list into one root.
//! - [`batch_verify`] checks many (input, digest) pairs without stopping at
//!   the first failure.
//! - [`CollisionDetector`] flags distinct inputs that share a digest.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proofchain_hash::{hash, merkle_root};
//!
//! let a = hash("2+2");
//! let b = hash("4");
//! let root = merkle_root(&[a, b]);
//! ```

pub mod batch;
pub mod collision;
pub mod hashing;
pub mod merkle;

pub use batch::{batch_verify, BatchItem, BatchItemResult, BatchReport};
pub use collision::{BoundedDigestStore, CollisionDetector, CollisionReport, InMemoryDigestStore};
pub use hashing::{canonical_json, compare_hashes, hash, hash_object, hash_with_timestamp};
pub use merkle::{merkle_proof, merkle_root, verify_merkle_proof, ProofStep, Side};

// ── Tests ─────────────────────────────────────────────────────────────────────
