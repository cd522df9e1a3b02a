//! Core trait definitions.
//!
//! Both traits sit on the untrusted side of the chain: a sink may fail and a
//! store may forget, and neither can affect the digests already computed.

use proofchain_contracts::{digest::Digest, entry::LogEntry, error::ChainResult};

/// A presentation sink for event log entries.
///
/// Sinks receive entries only after they have been hashed and appended.
/// `emit` failures are caught by the event log and reported through
/// `tracing`; they never fail the logging call or touch the chain.
pub trait LogSink: Send + Sync {
    /// Short name used in warnings (e.g. `"console"`, `"file"`).
    fn name(&self) -> &str;

    /// Present one entry.
    ///
    /// Implementations must not block on slow I/O; buffer or hand off
    /// instead. Return `ChainError::SinkFailure` when the entry could not be
    /// accepted.
    fn emit(&self, entry: &LogEntry) -> ChainResult<()>;

    /// Block until everything accepted so far has been written.
    fn flush(&self) -> ChainResult<()> {
        Ok(())
    }

    /// Flush and release resources. Later `emit` calls may fail.
    fn close(&self) -> ChainResult<()> {
        self.flush()
    }
}

/// Storage for the digest → distinct inputs mapping used by collision
/// detection.
///
/// Implementations must be safe to share across threads. The in-memory
/// default grows without bound; bounded implementations may evict, which
/// only ever causes missed detections, never false ones.
pub trait DigestStore: Send + Sync {
    /// Associate `input` with `digest` and return the distinct inputs that
    /// were associated with `digest` before this call.
    fn record(&self, digest: &Digest, input: &str) -> Vec<String>;

    /// Distinct inputs currently associated with `digest`.
    fn inputs_for(&self, digest: &Digest) -> Vec<String>;

    /// Number of digests tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything.
    fn clear(&self);
}
