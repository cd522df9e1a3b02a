//! Application context shared by every scenario.

use std::path::Path;

use proofchain_contracts::error::ChainResult;
use proofchain_ledger::ProofLedger;
use proofchain_log::{EventLog, EventLogConfig};

/// Owns the event log and the proof ledger for one CLI run.
pub struct AppContext {
    pub events: EventLog,
    pub ledger: ProofLedger,
}

impl AppContext {
    /// Build the context, reading the event log config from `config` when
    /// given and falling back to defaults otherwise.
    pub fn new(config: Option<&Path>) -> ChainResult<Self> {
        let config = match config {
            Some(path) => EventLogConfig::from_file(path)?,
            None => EventLogConfig::default(),
        };
        Ok(Self {
            events: EventLog::new(config)?,
            ledger: ProofLedger::new(),
        })
    }

    /// Flush and close the event log's sinks.
    pub fn shutdown(&self) {
        self.events.close();
    }
}
