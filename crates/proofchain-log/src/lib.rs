//! # proofchain-log
//!
//! Append-only, leveled event log whose entries form a SHA-256 hash chain.
//!
//! ## Overview
//!
//! Every call to [`EventLog::log`] produces a `LogEntry` whose digest covers
//! its id, timestamp, level, message, payload, chain id, and the digest of
//! the entry before it. Editing, dropping, or reordering any stored entry is
//! detected by [`EventLog::verify`], which reports every break it finds.
//!
//! Entries are presented through pluggable `LogSink`s (a `tracing` console
//! sink and a background JSONL file sink ship here). Sinks are gated by the
//! configured minimum level; the chain itself always keeps every entry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use proofchain_log::{EventLog, EventLogConfig};
//!
//! let log = EventLog::new(EventLogConfig::default())?;
//! log.info("calibration started")?;
//! assert!(log.verify_chain());
//! let export = log.export_to_json()?;
//! ```

pub mod config;
pub mod log;
pub mod sink;
pub mod verify;

pub use config::EventLogConfig;
pub use log::EventLog;
pub use sink::{ConsoleSink, FileSink};
pub use verify::verify_entries;

// ── Tests ─────────────────────────────────────────────────────────────────────
