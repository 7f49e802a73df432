// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document id assignment.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Generate a document id from the record's name and the assignment time.
/// Format: d-{hash} where hash is the first 12 hex chars of
/// SHA256(name + timestamp).
pub fn generate_id(name: &str, assigned_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", name, assigned_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..6]); // First 12 hex chars (6 bytes)
    format!("d-{}", short_hash)
}

/// Generate an id not present in the collection, handling collisions by
/// appending an incrementing suffix.
pub fn generate_unique_id<F>(name: &str, assigned_at: &DateTime<Utc>, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(name, assigned_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
