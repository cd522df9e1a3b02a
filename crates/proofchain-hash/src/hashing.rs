//! SHA-256 digest functions.
//!
//! Every digest in the workspace comes from [`hash`]. Structured values go
//! through [`canonical_json`] first: compact JSON with object keys sorted at
//! every depth, so field order in the source value never changes a digest.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

use proofchain_contracts::{digest::Digest, error::ChainResult};

fn finish(hasher: Sha256) -> Digest {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    Digest::from_bytes(&out)
}

/// SHA-256 of `bytes` as a lowercase hex digest.
pub fn hash(bytes: impl AsRef<[u8]>) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes.as_ref());
    finish(hasher)
}

/// Hash `"<timestamp>|<bytes>"`.
///
/// The timestamp is rendered as ISO-8601 UTC with millisecond precision and
/// a `Z` suffix (e.g. `2024-01-01T00:00:00.000Z`). When `timestamp` is
/// `None` the current time is used, so the result is only reproducible when
/// the caller pins the timestamp.
pub fn hash_with_timestamp(bytes: impl AsRef<[u8]>, timestamp: Option<DateTime<Utc>>) -> Digest {
    let timestamp = timestamp.unwrap_or_else(Utc::now);
    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true).as_bytes());
    hasher.update(b"|");
    hasher.update(bytes.as_ref());
    finish(hasher)
}

/// Render `value` as canonical JSON.
///
/// Returns `ChainError::Serialization` if the value has no JSON form (for
/// example a map with non-string keys).
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> ChainResult<String> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&canonicalize(value))?)
}

/// Hash the canonical JSON form of `value`.
pub fn hash_object<T: Serialize + ?Sized>(value: &T) -> ChainResult<Digest> {
    Ok(hash(canonical_json(value)?))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Constant-time digest comparison.
///
/// Runs over the full length of the inputs regardless of where they first
/// differ. Inputs of different lengths compare unequal.
pub fn compare_hashes(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
