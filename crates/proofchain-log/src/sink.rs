//! Presentation sinks for event log entries.
//!
//! - `ConsoleSink` re-emits entries as `tracing` events.
//! - `FileSink` appends entries as JSON lines. The caller only pushes the
//!   serialized line into a bounded channel; a background thread owns the
//!   file and does the writing, so a slow disk never stalls `EventLog::log`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use proofchain_contracts::{
    entry::{LogEntry, LogLevel},
    error::{ChainError, ChainResult},
};
use proofchain_core::traits::LogSink;

// ── Console ───────────────────────────────────────────────────────────────────

/// Emits entries through `tracing` under the `proofchain::events` target.
///
/// PROOF and VALIDATION entries have no `tracing` counterpart and are
/// emitted at INFO.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&self, entry: &LogEntry) -> ChainResult<()> {
        let level = entry.level.as_str();
        match entry.level {
            LogLevel::Debug => debug!(
                target: "proofchain::events",
                entry_id = entry.id, entry_level = level, digest = %entry.digest,
                "{}", entry.message
            ),
            LogLevel::Info | LogLevel::Proof | LogLevel::Validation => info!(
                target: "proofchain::events",
                entry_id = entry.id, entry_level = level, digest = %entry.digest,
                "{}", entry.message
            ),
            LogLevel::Warn => warn!(
                target: "proofchain::events",
                entry_id = entry.id, entry_level = level, digest = %entry.digest,
                "{}", entry.message
            ),
            LogLevel::Error => error!(
                target: "proofchain::events",
                entry_id = entry.id, entry_level = level, digest = %entry.digest,
                "{}", entry.message
            ),
        }
        Ok(())
    }
}

// ── File ──────────────────────────────────────────────────────────────────────

enum Command {
    Line(String),
    Flush(mpsc::Sender<()>),
}

/// Append-only JSONL sink with a background writer thread.
///
/// When the channel is full the entry is dropped and `emit` returns
/// `SinkFailure`; the event log turns that into a warning. The in-memory
/// chain always keeps the entry.
///
/// Line order is best-effort. With concurrent writers, lines can land out of
/// id order; sort by `id` to recover chain order.
pub struct FileSink {
    path: PathBuf,
    sender: Mutex<Option<SyncSender<Command>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl FileSink {
    /// Open (creating if needed) `path` for appending and start the writer.
    ///
    /// Errors opening the file surface here, synchronously; write errors
    /// later on are only logged.
    pub fn open(path: impl AsRef<Path>, buffer: usize) -> ChainResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let (sender, receiver) = mpsc::sync_channel(buffer.max(1));
        let worker_path = path.clone();
        let worker = thread::Builder::new()
            .name("proofchain-file-sink".to_string())
            .spawn(move || run_writer(file, receiver, worker_path))?;

        Ok(Self {
            path,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, reason: impl Into<String>) -> ChainError {
        ChainError::SinkFailure {
            sink: self.name().to_string(),
            reason: reason.into(),
        }
    }

    fn sender(&self) -> ChainResult<SyncSender<Command>> {
        let guard = self
            .sender
            .lock()
            .map_err(|e| self.failure(format!("sender lock poisoned: {}", e)))?;
        guard.clone().ok_or_else(|| self.failure("sink is closed"))
    }
}

fn run_writer(file: File, receiver: Receiver<Command>, path: PathBuf) {
    let mut writer = BufWriter::new(file);
    for command in receiver {
        match command {
            Command::Line(line) => {
                if let Err(e) = writeln!(writer, "{}", line) {
                    warn!(path = %path.display(), error = %e, "failed to write log line");
                }
            }
            Command::Flush(ack) => {
                if let Err(e) = writer.flush() {
                    warn!(path = %path.display(), error = %e, "failed to flush log file");
                }
                let _ = ack.send(());
            }
        }
    }
    if let Err(e) = writer.flush() {
        warn!(path = %path.display(), error = %e, "failed to flush log file on close");
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn emit(&self, entry: &LogEntry) -> ChainResult<()> {
        let line = serde_json::to_string(entry)?;
        match self.sender()?.try_send(Command::Line(line)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(self.failure(format!(
                "buffer full, entry {} dropped from file output",
                entry.id
            ))),
            Err(TrySendError::Disconnected(_)) => Err(self.failure("writer thread has exited")),
        }
    }

    /// Block until the writer has written and flushed every accepted line.
    fn flush(&self) -> ChainResult<()> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.sender()?
            .send(Command::Flush(ack_tx))
            .map_err(|_| self.failure("writer thread has exited"))?;
        ack_rx
            .recv()
            .map_err(|_| self.failure("writer thread exited before flushing"))
    }

    /// Drain the channel and join the writer thread. Idempotent.
    fn close(&self) -> ChainResult<()> {
        let sender = self
            .sender
            .lock()
            .map_err(|e| self.failure(format!("sender lock poisoned: {}", e)))?
            .take();
        drop(sender);

        let worker = self
            .worker
            .lock()
            .map_err(|e| self.failure(format!("worker lock poisoned: {}", e)))?
            .take();
        if let Some(worker) = worker {
            worker
                .join()
                .map_err(|_| self.failure("writer thread panicked"))?;
        }
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(path = %self.path.display(), error = %e, "file sink did not close cleanly");
        }
    }
}
