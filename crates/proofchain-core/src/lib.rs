//! # proofchain-core
//!
//! The trait seams of the proofchain workspace.
//!
//! - `LogSink`     : where event log entries are presented (console, file)
//! - `DigestStore` : where the collision detector keeps digest → input sets
//!
//! Chaining logic depends only on these traits, so presentation and storage
//! strategy can be swapped without touching how digests are linked.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proofchain_core::traits::{DigestStore, LogSink};
//! ```

pub mod traits;

pub use traits::{DigestStore, LogSink};
