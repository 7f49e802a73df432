// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fleet-client: Remote collection client for the fleet device dashboard.
//!
//! Wraps the remote document collection behind three asynchronous
//! operations: create-or-replace, full fetch, and delete-by-id.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ CollectionClient │────►│  Transport  │────►│   Remote    │
//! │  upsert/list/del │◄────│   (trait)   │◄────│ Collection  │
//! └──────────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - WebSocket connection to a fleet-remote server
//! - Request/response correlation per operation
//! - Automatic reconnect with exponential backoff
//! - Injectable transport trait for testing
//!
//! Collection operations are never retried: each completes exactly once
//! with a value or an error, and the caller decides what to surface.

mod client;
mod transport;

pub use client::{ClientConfig, CollectionClient, ConnectionState};
pub use transport::{Transport, TransportError, TransportResult, WebSocketTransport};

#[cfg(test)]
mod client_tests;

#[cfg(test)]
mod transport_tests;
