//! Deterministic identifiers for generated task instances.

use sha2::{Digest, Sha256};

/// Returns the instance identifier for a rule occurrence in a store target.
///
/// The identifier is the hex SHA-256 of `target|rule|occurrence`, so the same
/// triple always maps to the same value regardless of which process or store
/// client computes it. `occurrence` must be formatted as `YYYY-MM-DD`.
pub fn instance_id(target: &str, rule_id: &str, occurrence: &str) -> String {
    let canonical = format!("{target}|{rule_id}|{occurrence}");
    let digest = Sha256::digest(canonical.as_bytes());
    format!("{digest:x}")
}
