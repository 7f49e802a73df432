// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the collection client.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use fleet_core::protocol::{ClientMessage, ServerMessage};
use fleet_core::{Device, Document, Error};

use super::client::{ClientConfig, CollectionClient, ConnectionState};
use super::transport_tests::MockTransport;

fn make_client(transport: MockTransport) -> CollectionClient<MockTransport> {
    CollectionClient::with_transport(ClientConfig::default(), transport)
}

fn named_device(name: &str) -> Device {
    Device {
        device_name: name.into(),
        ..Device::default()
    }
}

#[tokio::test]
async fn client_connect_disconnect() {
    let mut client = make_client(MockTransport::new());

    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(!client.is_connected());

    client.connect().await.unwrap();

    assert_eq!(client.state(), ConnectionState::Connected);
    assert!(client.is_connected());

    client.disconnect().await.unwrap();

    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(!client.is_connected());
}

#[tokio::test]
async fn upsert_without_id_requests_a_create() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::upsert_ok(1, "d-1"));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    let assigned = client.upsert(&named_device("Pump 3")).await.unwrap();

    assert_eq!(assigned, "d-1");
}

#[tokio::test]
async fn upsert_with_id_targets_that_document() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::upsert_ok(1, "d-7"));
    let mut client = make_client(transport);

    client.connect().await.unwrap();

    let device = Device {
        id: "d-7".into(),
        ..named_device("Pump 3")
    };
    let echoed = client.upsert(&device).await.unwrap();
    assert_eq!(echoed, "d-7");
}

#[tokio::test]
async fn upsert_sends_fields_without_id() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::upsert_ok(1, "d-1"));
    let sent = transport.outgoing_handle();
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    client.upsert(&named_device("Pump 3")).await.unwrap();

    // Inspect what went over the wire: a create (no id) whose field map
    // carries no id entry.
    let outgoing = sent.lock().unwrap().clone();
    assert_eq!(outgoing.len(), 1);
    match &outgoing[0] {
        ClientMessage::Upsert { id, fields, .. } => {
            assert!(id.is_none());
            assert!(!fields.contains_key("id"));
            assert_eq!(fields.get("device_name").unwrap(), "Pump 3");
        }
        other => panic!("expected upsert, got {:?}", other),
    }
}

#[tokio::test]
async fn upsert_surfaces_store_error() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::error(Some(1), "quota exceeded"));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    let err = client.upsert(&named_device("Pump 3")).await.unwrap_err();

    assert!(matches!(err, Error::Store(ref msg) if msg == "quota exceeded"));
}

#[tokio::test]
async fn list_all_decodes_documents_and_injects_ids() {
    let mut fields = BTreeMap::new();
    fields.insert("device_name".to_string(), "Pump 3".to_string());
    // A stray id entry in the stored fields must not survive decoding.
    fields.insert("id".to_string(), "impostor".to_string());

    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::list_ok(
        1,
        vec![Document {
            id: "d-7".into(),
            fields,
        }],
    ));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    let devices = client.list_all().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].id, "d-7");
    assert_eq!(devices[0].device_name, "Pump 3");
}

#[tokio::test]
async fn delete_succeeds_on_ack() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::delete_ok(1));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    client.delete("d-7").await.unwrap();
}

#[tokio::test]
async fn delete_surfaces_store_error() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::error(Some(1), "permission denied"));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    let err = client.delete("d-7").await.unwrap_err();

    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn operations_fail_when_disconnected() {
    let mut client = make_client(MockTransport::new());

    let err = client.upsert(&named_device("Pump 3")).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    let err = client.list_all().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    let err = client.delete("d-7").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn round_trip_skips_uncorrelated_frames() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::pong(99));
    transport.queue_incoming(ServerMessage::delete_ok(1));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    client.delete("d-7").await.unwrap();
}

#[tokio::test]
async fn closed_connection_mid_request_is_a_transport_error() {
    // Nothing queued: recv reports the stream as closed.
    let mut client = make_client(MockTransport::new());

    client.connect().await.unwrap();
    let err = client.delete("d-7").await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!client.is_connected());
}

#[tokio::test]
async fn connect_with_retry_gives_up_after_max_attempts() {
    let mut transport = MockTransport::new();
    transport.set_connect_fail(true);

    let config = ClientConfig {
        max_retries: 3,
        initial_delay_ms: 1,
        ..ClientConfig::default()
    };
    let mut client = CollectionClient::with_transport(config, transport);

    let err = client.connect_with_retry().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn ping_waits_for_matching_pong() {
    let transport = MockTransport::new();
    transport.queue_incoming(ServerMessage::pong(7));
    transport.queue_incoming(ServerMessage::pong(42));
    let mut client = make_client(transport);

    client.connect().await.unwrap();
    client.ping(42).await.unwrap();
}
