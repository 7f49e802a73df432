// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for client-server communication.
//!
//! The protocol is plain request/response:
//! - The client sends one collection operation at a time, tagged with a
//!   correlation number of its choosing.
//! - The server answers each request with exactly one message echoing that
//!   number, or an `Error` carrying the store's failure description.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Create or replace a document.
    ///
    /// With an id, the document at that id is replaced (or created there).
    /// Without one, the store assigns a fresh id and reports it in the ack.
    Upsert {
        /// Client-chosen number echoed in the response.
        request: u64,
        /// Target document id, if the record is already persisted.
        id: Option<String>,
        /// Encoded record fields, excluding the id.
        fields: BTreeMap<String, String>,
    },

    /// Fetch every document in the collection.
    List {
        /// Client-chosen number echoed in the response.
        request: u64,
    },

    /// Remove the document with the given id.
    ///
    /// Deleting an id that does not exist is a success.
    Delete {
        /// Client-chosen number echoed in the response.
        request: u64,
        /// Target document id.
        id: String,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Ack for an Upsert, carrying the document's id.
    ///
    /// For a create this is the freshly assigned id; for a replace it
    /// echoes the id the client sent.
    UpsertOk {
        /// Echoed from the request.
        request: u64,
        /// The document's id in the store.
        id: String,
    },

    /// Response to a List request with the full collection contents.
    ListOk {
        /// Echoed from the request.
        request: u64,
        /// Every document, in store-defined (id) order.
        documents: Vec<Document>,
    },

    /// Ack for a Delete.
    DeleteOk {
        /// Echoed from the request.
        request: u64,
    },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// A failed request.
    Error {
        /// Echoed from the request, when the request could be read at all.
        request: Option<u64>,
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates an Upsert message.
    pub fn upsert(request: u64, id: Option<String>, fields: BTreeMap<String, String>) -> Self {
        ClientMessage::Upsert {
            request,
            id,
            fields,
        }
    }

    /// Creates a List message.
    pub fn list(request: u64) -> Self {
        ClientMessage::List { request }
    }

    /// Creates a Delete message.
    pub fn delete(request: u64, id: impl Into<String>) -> Self {
        ClientMessage::Delete {
            request,
            id: id.into(),
        }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an UpsertOk message.
    pub fn upsert_ok(request: u64, id: impl Into<String>) -> Self {
        ServerMessage::UpsertOk {
            request,
            id: id.into(),
        }
    }

    /// Creates a ListOk message.
    pub fn list_ok(request: u64, documents: Vec<Document>) -> Self {
        ServerMessage::ListOk { request, documents }
    }

    /// Creates a DeleteOk message.
    pub fn delete_ok(request: u64) -> Self {
        ServerMessage::DeleteOk { request }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(request: Option<u64>, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            request,
            message: message.into(),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
