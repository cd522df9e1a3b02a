//! The `Digest` value type and the zero sentinel.
//!
//! A digest is always the lowercase hex encoding of a 256-bit hash, so its
//! text form is exactly 64 characters of `[0-9a-f]`. That representation is
//! the external contract: exported chains store it verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult};

/// The `previous_digest` of the first entry or record in every chain.
pub const ZERO_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// A 256-bit digest in lowercase hex form.
///
/// Digests are opaque comparable values. Deserialization validates the text
/// form, so a malformed digest in an imported document is rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// The zero sentinel ("no predecessor").
    pub fn zero() -> Self {
        Self(ZERO_DIGEST.to_string())
    }

    /// Encode raw hash output.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse and validate a hex digest.
    ///
    /// Returns `ChainError::InvalidInput` unless `s` is exactly 64 lowercase
    /// hex characters.
    pub fn parse(s: impl Into<String>) -> ChainResult<Self> {
        let s = s.into();
        if s.len() != DIGEST_HEX_LEN {
            return Err(ChainError::InvalidInput {
                reason: format!(
                    "digest must be {} hex characters, got {}",
                    DIGEST_HEX_LEN,
                    s.len()
                ),
            });
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ChainError::InvalidInput {
                reason: format!("digest '{}' is not lowercase hex", s),
            });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_DIGEST
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Digest {
    type Error = ChainError;

    fn try_from(s: String) -> ChainResult<Self> {
        Self::parse(s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.0
    }
}
