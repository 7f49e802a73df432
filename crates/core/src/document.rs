// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document envelope for the storage boundary.
//!
//! A document is a storage id plus a flat mapping of field name to string
//! value. The id lives on the envelope only: it is excluded from the field
//! map on encode, and on decode it is injected into [`Device::id`] after
//! the field map has been read. Injection happens last so that a stray
//! `id` entry inside the field map can never shadow the storage id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device::Device;
use crate::error::{Error, Result};

/// A stored record as the collection sees it: envelope id plus field map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The store-assigned identifier. Empty only for a create request.
    pub id: String,
    /// Flat field-name-to-value mapping, excluding the id.
    pub fields: BTreeMap<String, String>,
}

impl Document {
    /// Encodes a device into its field map under the given envelope id.
    ///
    /// The device's own `id` is not consulted; callers decide what goes on
    /// the envelope (the client sends the record id, the server stores the
    /// id it assigned).
    pub fn encode(id: impl Into<String>, device: &Device) -> Result<Self> {
        let value = serde_json::to_value(device)?;
        let Value::Object(map) = value else {
            return Err(Error::Document("device did not encode to an object".into()));
        };

        let mut fields = BTreeMap::new();
        for (name, value) in map {
            let Value::String(text) = value else {
                return Err(Error::Document(format!("field {name} is not a string")));
            };
            fields.insert(name, text);
        }

        Ok(Document {
            id: id.into(),
            fields,
        })
    }

    /// Decodes the field map into a device and injects the envelope id.
    ///
    /// Missing fields decode to empty strings; unknown fields are ignored.
    pub fn decode(&self) -> Result<Device> {
        let map = self
            .fields
            .iter()
            .map(|(name, text)| (name.clone(), Value::String(text.clone())))
            .collect();

        let mut device: Device = serde_json::from_value(Value::Object(map))?;
        // The storage id wins over whatever the field map produced.
        device.id = self.id.clone();
        Ok(device)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
