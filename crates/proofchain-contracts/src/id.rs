//! Chain identifiers.

use chrono::Utc;

/// Generate a chain identifier: `<prefix>-<unix millis>-<8 random hex chars>`.
///
/// Used when a caller does not supply an explicit identifier. The random
/// suffix keeps identifiers distinct for chains created in the same
/// millisecond.
pub fn generate_chain_id(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &suffix[..8])
}
