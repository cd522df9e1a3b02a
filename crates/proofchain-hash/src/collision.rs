//! Best-effort digest collision tracking.
//!
//! `CollisionDetector` remembers which distinct raw inputs produced each
//! digest and flags the moment a new input lands on a digest already claimed
//! by a different input. This is instrumentation for test and audit runs,
//! not a security control.
//!
//! Storage is pluggable through [`DigestStore`]. `InMemoryDigestStore`
//! grows without bound; callers that need a memory cap use
//! `BoundedDigestStore` or call `clear()` periodically.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use proofchain_contracts::digest::Digest;
use proofchain_core::traits::DigestStore;

use crate::hashing::hash;

// ── Stores ────────────────────────────────────────────────────────────────────

/// Unbounded digest store.
#[derive(Debug, Default)]
pub struct InMemoryDigestStore {
    inner: Mutex<HashMap<Digest, BTreeSet<String>>>,
}

impl InMemoryDigestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigestStore for InMemoryDigestStore {
    fn record(&self, digest: &Digest, input: &str) -> Vec<String> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let inputs = map.entry(digest.clone()).or_default();
        let before = inputs.iter().cloned().collect();
        inputs.insert(input.to_string());
        before
    }

    fn inputs_for(&self, digest: &Digest) -> Vec<String> {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(digest)
            .map(|inputs| inputs.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[derive(Debug, Default)]
struct BoundedState {
    map: HashMap<Digest, BTreeSet<String>>,
    /// Digests in first-seen order; the front is evicted first.
    order: VecDeque<Digest>,
}

/// Digest store that keeps at most `capacity` digests, evicting the oldest.
#[derive(Debug)]
pub struct BoundedDigestStore {
    capacity: usize,
    inner: Mutex<BoundedState>,
}

impl BoundedDigestStore {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(BoundedState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl DigestStore for BoundedDigestStore {
    fn record(&self, digest: &Digest, input: &str) -> Vec<String> {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(inputs) = state.map.get_mut(digest) {
            let before = inputs.iter().cloned().collect();
            inputs.insert(input.to_string());
            return before;
        }

        while state.map.len() >= self.capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.map.remove(&oldest);
                }
                None => break,
            }
        }

        state
            .map
            .insert(digest.clone(), BTreeSet::from([input.to_string()]));
        state.order.push_back(digest.clone());
        Vec::new()
    }

    fn inputs_for(&self, digest: &Digest) -> Vec<String> {
        let state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .map
            .get(digest)
            .map(|inputs| inputs.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .len()
    }

    fn clear(&self) {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.map.clear();
        state.order.clear();
    }
}

// ── Detector ──────────────────────────────────────────────────────────────────

/// Outcome of one `CollisionDetector::detect` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionReport {
    pub digest: Digest,
    /// True when `input` is new for `digest` and a different input already
    /// claimed it. Repeat sightings of a known input never report.
    pub is_collision: bool,
    /// Previously seen inputs for `digest` other than the one just checked.
    pub existing_inputs: Vec<String>,
}

/// Tracks digest → input associations and reports collisions.
pub struct CollisionDetector<S: DigestStore = InMemoryDigestStore> {
    store: S,
}

impl CollisionDetector<InMemoryDigestStore> {
    /// A detector backed by the unbounded in-memory store.
    pub fn new() -> Self {
        Self::with_store(InMemoryDigestStore::new())
    }
}

impl Default for CollisionDetector<InMemoryDigestStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DigestStore> CollisionDetector<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Hash `input`, record it, and report whether a different input already
    /// produced the same digest.
    ///
    /// Only the first sighting of an input can be a collision; later calls
    /// with the same input still list the other inputs but do not report.
    pub fn detect(&self, input: &str) -> CollisionReport {
        let digest = hash(input);
        let prior = self.store.record(&digest, input);
        let already_known = prior.iter().any(|seen| seen == input);
        let existing_inputs: Vec<String> =
            prior.into_iter().filter(|seen| seen != input).collect();

        let is_collision = !already_known && !existing_inputs.is_empty();
        if is_collision {
            warn!(
                digest = %digest,
                existing = existing_inputs.len(),
                "digest collision detected"
            );
        }

        CollisionReport {
            digest,
            is_collision,
            existing_inputs,
        }
    }

    /// Number of digests currently tracked.
    pub fn tracked_digests(&self) -> usize {
        self.store.len()
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
