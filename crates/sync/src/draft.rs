// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transient form-editing state for one add-or-edit session.

use fleet_core::Device;

/// The editable fields of one edit session.
///
/// Owned by the editing UI component for the lifetime of its dialog and
/// committed to a [`Device`] only on confirm. Cancelling an edit is just
/// dropping the draft; nothing else holds form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDraft {
    pub body_code: String,
    pub device_code: String,
    pub device_name: String,
    pub serial_number: String,
    pub device_model: String,
    pub city: String,
}

impl DeviceDraft {
    /// Prefill a draft from an existing record, for an edit session.
    pub fn from_device(device: &Device) -> Self {
        DeviceDraft {
            body_code: device.body_code.clone(),
            device_code: device.device_code.clone(),
            device_name: device.device_name.clone(),
            serial_number: device.serial_number.clone(),
            device_model: device.device_model.clone(),
            city: device.city.clone(),
        }
    }

    /// Commit the draft to a record.
    ///
    /// Pass the existing record's id for an edit, or an empty id for a
    /// record the store has not seen yet.
    pub fn commit(self, id: impl Into<String>) -> Device {
        Device {
            id: id.into(),
            body_code: self.body_code,
            device_code: self.device_code,
            device_name: self.device_name,
            serial_number: self.serial_number,
            device_model: self.device_model,
            city: self.city,
        }
    }
}

#[cfg(test)]
#[path = "draft_tests.rs"]
mod tests;
