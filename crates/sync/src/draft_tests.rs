// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn commit_with_empty_id_yields_unpersisted_device() {
    let draft = DeviceDraft {
        device_name: "Pump 3".into(),
        city: "Surabaya".into(),
        ..DeviceDraft::default()
    };

    let device = draft.commit("");
    assert!(!device.is_persisted());
    assert_eq!(device.device_name, "Pump 3");
    assert_eq!(device.city, "Surabaya");
}

#[test]
fn commit_with_id_targets_existing_record() {
    let draft = DeviceDraft {
        device_name: "Pump 3 (rebuilt)".into(),
        ..DeviceDraft::default()
    };

    let device = draft.commit("d-7");
    assert_eq!(device.id, "d-7");
    assert_eq!(device.device_name, "Pump 3 (rebuilt)");
}

#[test]
fn from_device_prefills_every_editable_field() {
    let device = Device {
        id: "d-7".into(),
        body_code: "BC-1".into(),
        device_code: "DC-2".into(),
        device_name: "Pump 3".into(),
        serial_number: "SN-4".into(),
        device_model: "X9".into(),
        city: "Medan".into(),
    };

    let draft = DeviceDraft::from_device(&device);
    // The id is not part of the draft; it comes back at commit time.
    assert_eq!(draft.commit(device.id.clone()), device);
}
