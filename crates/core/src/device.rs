// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The device record, the unit of storage in the fleet collection.

use serde::{Deserialize, Serialize};

/// A single managed device.
///
/// The `id` is assigned by the store and is immutable once persisted; an
/// empty `id` marks a record that has not reached the store yet. It is
/// never part of the encoded field map (see [`crate::document::Document`]),
/// which is why it is skipped on serialization. All other fields are
/// free-form text with no cross-field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    #[serde(skip_serializing)]
    pub id: String,
    pub body_code: String,
    pub device_code: String,
    pub device_name: String,
    pub serial_number: String,
    pub device_model: String,
    pub city: String,
}

impl Device {
    /// Returns true once the store has assigned this record an identifier.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
