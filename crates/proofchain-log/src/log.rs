//! The hash-chained event log.
//!
//! `EventLog` is an explicitly constructed value. Applications build one,
//! keep it in their context struct, and hand out references; there is no
//! global instance.
//!
//! Appends take the state mutex for the whole read-tail / hash / push /
//! advance-tail sequence, so concurrent writers can never link two entries
//! to the same predecessor. Sinks run after the mutex is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{info, warn};

use proofchain_contracts::{
    digest::Digest,
    entry::{LogEntry, LogLevel, Payload},
    error::{ChainError, ChainResult},
    export::EventLogExport,
    id::generate_chain_id,
    report::VerificationReport,
};
use proofchain_core::traits::LogSink;
use proofchain_hash::hash_object;

use crate::{
    config::EventLogConfig,
    sink::{ConsoleSink, FileSink},
    verify::verify_entries,
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct LogState {
    /// Every entry appended since construction or the last reset.
    pub(crate) entries: Vec<LogEntry>,

    /// Id for the next entry.
    pub(crate) next_id: u64,

    /// Digest of the last entry, or the zero sentinel.
    pub(crate) last_digest: Digest,
}

impl LogState {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            last_digest: Digest::zero(),
        }
    }
}

// ── Public log ────────────────────────────────────────────────────────────────

/// An append-only, leveled, SHA-256 hash-chained log.
pub struct EventLog {
    chain_id: String,
    min_level: LogLevel,
    hash_chaining: bool,
    pub(crate) state: Mutex<LogState>,
    sinks: Mutex<Vec<Arc<dyn LogSink>>>,
}

impl EventLog {
    /// Build a log and the sinks `config` asks for.
    ///
    /// Fails with `ChainError::Io` if the configured log file cannot be
    /// opened.
    pub fn new(config: EventLogConfig) -> ChainResult<Self> {
        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::new();
        if config.console {
            sinks.push(Arc::new(ConsoleSink));
        }
        if let Some(path) = &config.file {
            sinks.push(Arc::new(FileSink::open(path, config.file_buffer)?));
        }
        Ok(Self::with_sinks(config, sinks))
    }

    /// Build a log that presents entries through `sinks` only.
    ///
    /// `config.console` and `config.file` are ignored.
    pub fn with_sinks(config: EventLogConfig, sinks: Vec<Arc<dyn LogSink>>) -> Self {
        let chain_id = config
            .chain_id
            .unwrap_or_else(|| generate_chain_id("log"));

        if !config.hash_chaining {
            warn!(
                chain_id = %chain_id,
                "hash chaining disabled: entries will not link and verification will fail"
            );
        }

        Self {
            chain_id,
            min_level: config.min_level,
            hash_chaining: config.hash_chaining,
            state: Mutex::new(LogState::new()),
            sinks: Mutex::new(sinks),
        }
    }

    fn read_state(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry and present it to the sinks.
    ///
    /// The entry is chained and stored regardless of `min_level`; the level
    /// gate only decides whether sinks see it. Sink failures are logged and
    /// swallowed. Sinks run outside the state lock, so concurrent callers
    /// may present entries out of id order.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        payload: Option<Payload>,
    ) -> ChainResult<LogEntry> {
        let entry = {
            let mut state = self.state.lock().map_err(|e| ChainError::LockPoisoned {
                reason: format!("event log state: {}", e),
            })?;

            let previous_digest = if self.hash_chaining {
                state.last_digest.clone()
            } else {
                Digest::zero()
            };

            let mut entry = LogEntry {
                id: state.next_id,
                timestamp: Utc::now(),
                level,
                message: message.into(),
                payload,
                digest: Digest::zero(),
                previous_digest,
                chain_id: self.chain_id.clone(),
            };
            entry.digest = hash_object(&entry.content())?;

            state.entries.push(entry.clone());
            state.next_id += 1;
            state.last_digest = entry.digest.clone();
            entry
        };

        if level >= self.min_level {
            self.present(&entry);
        }
        Ok(entry)
    }

    fn present(&self, entry: &LogEntry) {
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for sink in sinks {
            if let Err(e) = sink.emit(entry) {
                warn!(
                    sink = sink.name(),
                    entry_id = entry.id,
                    error = %e,
                    "sink rejected log entry; chain unaffected"
                );
            }
        }
    }

    pub fn debug(&self, message: impl Into<String>) -> ChainResult<LogEntry> {
        self.log(LogLevel::Debug, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> ChainResult<LogEntry> {
        self.log(LogLevel::Info, message, None)
    }

    pub fn warn(&self, message: impl Into<String>) -> ChainResult<LogEntry> {
        self.log(LogLevel::Warn, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> ChainResult<LogEntry> {
        self.log(LogLevel::Error, message, None)
    }

    /// Log a PROOF entry carrying `payload`.
    pub fn proof(&self, message: impl Into<String>, payload: Payload) -> ChainResult<LogEntry> {
        self.log(LogLevel::Proof, message, Some(payload))
    }

    /// Log a VALIDATION entry carrying `payload`.
    pub fn validation(
        &self,
        message: impl Into<String>,
        payload: Payload,
    ) -> ChainResult<LogEntry> {
        self.log(LogLevel::Validation, message, Some(payload))
    }

    // ── Verification ──────────────────────────────────────────────────────────

    /// Full verification report over a snapshot of the entries.
    pub fn verify(&self) -> VerificationReport {
        let snapshot = self.entries();
        let report = verify_entries(&snapshot);
        if !report.valid {
            warn!(
                chain_id = %self.chain_id,
                broken = ?report.broken_links,
                "event log failed verification"
            );
        }
        report
    }

    /// True when every entry links and re-derives correctly.
    pub fn verify_chain(&self) -> bool {
        self.verify().valid
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Discard every entry and restart the chain at the zero sentinel.
    ///
    /// Meant for test isolation.
    pub fn reset(&self) {
        let mut state = self.read_state();
        let discarded = state.entries.len();
        *state = LogState::new();
        info!(chain_id = %self.chain_id, discarded, "event log reset");
    }

    /// Flush and close every sink.
    ///
    /// The log keeps accepting entries afterwards; they are chained but no
    /// longer presented anywhere.
    pub fn close(&self) {
        let sinks: Vec<Arc<dyn LogSink>> = self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for sink in sinks {
            if let Err(e) = sink.close() {
                warn!(sink = sink.name(), error = %e, "sink did not close cleanly");
            }
        }
    }

    /// Flush every sink without closing it.
    pub fn flush(&self) {
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for sink in sinks {
            if let Err(e) = sink.flush() {
                warn!(sink = sink.name(), error = %e, "sink flush failed");
            }
        }
    }

    // ── Export & lookup ───────────────────────────────────────────────────────

    /// Snapshot the log together with a freshly computed verification flag.
    pub fn export(&self) -> EventLogExport {
        let (entries, last_digest) = {
            let state = self.read_state();
            (state.entries.clone(), state.last_digest.clone())
        };
        let verified = verify_entries(&entries).valid;

        EventLogExport {
            proof_chain_id: self.chain_id.clone(),
            entry_count: entries.len(),
            last_digest,
            entries,
            verified,
        }
    }

    /// `export()` as pretty-printed JSON.
    pub fn export_to_json(&self) -> ChainResult<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.read_state().entries.clone()
    }

    /// Entries logged at exactly `level`.
    pub fn entries_at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.read_state()
            .entries
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_digest(&self) -> Digest {
        self.read_state().last_digest.clone()
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn hash_chaining(&self) -> bool {
        self.hash_chaining
    }
}
