// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote collection client.
//!
//! Provides the three collection operations over a transport:
//! - `upsert`: create a document or replace one by id
//! - `list_all`: fetch and decode the whole collection
//! - `delete`: remove a document by id
//!
//! Each operation is a single request/response exchange correlated by a
//! client-chosen number. Failures reported by the store surface as
//! [`Error::Store`]; connection-level failures as [`Error::Transport`].
//! Operations are never retried here.

use std::time::Duration;

use tracing::debug;

use fleet_core::protocol::{ClientMessage, ServerMessage};
use fleet_core::{Device, Document, Error, Result};

use crate::transport::{Transport, WebSocketTransport};

/// Configuration for the collection client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL of the remote collection server.
    pub url: String,
    /// Maximum reconnection attempts.
    pub max_retries: u32,
    /// Maximum delay between reconnection attempts (seconds).
    pub max_delay_secs: u64,
    /// Initial delay for exponential backoff (milliseconds).
    pub initial_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: "ws://localhost:7601".to_string(),
            max_retries: 10,
            max_delay_secs: 30,
            initial_delay_ms: 100,
        }
    }
}

/// State of the client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected.
    Disconnected,
    /// Attempting to connect.
    Connecting,
    /// Connected to the remote collection.
    Connected,
    /// Reconnecting after disconnect.
    Reconnecting { attempt: u32 },
}

/// Client for the remote document collection.
pub struct CollectionClient<T: Transport = WebSocketTransport> {
    /// Configuration.
    config: ClientConfig,
    /// Transport layer.
    transport: T,
    /// Connection state.
    state: ConnectionState,
    /// Correlation number for the next request.
    next_request: u64,
}

impl CollectionClient<WebSocketTransport> {
    /// Create a new client with the default WebSocket transport.
    pub fn new(config: ClientConfig) -> Self {
        CollectionClient::with_transport(config, WebSocketTransport::new())
    }
}

impl<T: Transport> CollectionClient<T> {
    /// Create a new client with a custom transport (for testing).
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        CollectionClient {
            config,
            transport,
            state: ConnectionState::Disconnected,
            next_request: 0,
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.transport.is_connected()
    }

    /// Connect to the remote collection.
    pub async fn connect(&mut self) -> Result<()> {
        self.state = ConnectionState::Connecting;

        match self.transport.connect(&self.config.url).await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }

    /// Disconnect from the remote collection.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await?;
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    /// Connect with exponential backoff retry.
    pub async fn connect_with_retry(&mut self) -> Result<()> {
        let mut attempt = 0;
        let mut delay_ms = self.config.initial_delay_ms;

        loop {
            attempt += 1;
            self.state = ConnectionState::Reconnecting { attempt };

            match self.transport.connect(&self.config.url).await {
                Ok(()) => {
                    self.state = ConnectionState::Connected;
                    return Ok(());
                }
                Err(_) if attempt >= self.config.max_retries => {
                    self.state = ConnectionState::Disconnected;
                    return Err(Error::Transport("reconnect attempts exhausted".into()));
                }
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_delay_secs * 1000);
                }
            }
        }
    }

    /// Create a document or replace one by id.
    ///
    /// With a persisted record (non-empty id) the document at that id is
    /// replaced. Otherwise the store assigns a fresh id. Either way the
    /// document's id in the store is returned, so callers can reconcile
    /// local placeholders without waiting for the next full fetch.
    pub async fn upsert(&mut self, device: &Device) -> Result<String> {
        let request = self.next_request();
        let doc = Document::encode("", device)?;
        let id = if device.id.is_empty() {
            None
        } else {
            Some(device.id.clone())
        };

        let reply = self
            .round_trip(ClientMessage::upsert(request, id, doc.fields), request)
            .await?;

        match reply {
            ServerMessage::UpsertOk { id, .. } => Ok(id),
            other => Err(protocol_violation(request, &other)),
        }
    }

    /// Fetch every document and decode it into a device.
    ///
    /// The envelope id is injected into each decoded record, overriding
    /// anything the stored field map may claim. Order is store-defined.
    pub async fn list_all(&mut self) -> Result<Vec<Device>> {
        let request = self.next_request();

        let reply = self.round_trip(ClientMessage::list(request), request).await?;

        match reply {
            ServerMessage::ListOk { documents, .. } => {
                documents.iter().map(Document::decode).collect()
            }
            other => Err(protocol_violation(request, &other)),
        }
    }

    /// Remove the document with the given id.
    ///
    /// Deleting an id the store does not hold is a success.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let request = self.next_request();

        let reply = self
            .round_trip(ClientMessage::delete(request, id), request)
            .await?;

        match reply {
            ServerMessage::DeleteOk { .. } => Ok(()),
            other => Err(protocol_violation(request, &other)),
        }
    }

    /// Send a ping and wait for the matching pong.
    pub async fn ping(&mut self, id: u64) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::Transport("not connected".into()));
        }

        self.send(ClientMessage::ping(id)).await?;

        loop {
            match self.recv().await? {
                Some(ServerMessage::Pong { id: echoed }) if echoed == id => return Ok(()),
                Some(other) => {
                    debug!("skipping frame while waiting for pong: {:?}", other);
                }
                None => return Err(Error::Transport("connection closed".into())),
            }
        }
    }

    fn next_request(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    async fn send(&mut self, msg: ClientMessage) -> Result<()> {
        match self.transport.send(msg).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }

    async fn recv(&mut self) -> Result<Option<ServerMessage>> {
        match self.transport.recv().await {
            Ok(Some(msg)) => Ok(Some(msg)),
            Ok(None) => {
                self.state = ConnectionState::Disconnected;
                Ok(None)
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }

    /// Send a request and wait for the response that echoes its number.
    ///
    /// Store-reported failures come back as `Err(Error::Store)`. Frames
    /// that belong to nobody (stray pongs, responses to other numbers) are
    /// skipped; there is at most one request outstanding per connection,
    /// so an error frame without a number is taken for this request.
    async fn round_trip(&mut self, msg: ClientMessage, request: u64) -> Result<ServerMessage> {
        if !self.is_connected() {
            return Err(Error::Transport("not connected".into()));
        }

        self.send(msg).await?;

        loop {
            match self.recv().await? {
                Some(ServerMessage::Error { request: echoed, message })
                    if echoed.is_none() || echoed == Some(request) =>
                {
                    return Err(Error::Store(message));
                }
                Some(reply) if correlates(&reply, request) => return Ok(reply),
                Some(other) => {
                    debug!("skipping uncorrelated frame: {:?}", other);
                }
                None => {
                    return Err(Error::Transport("connection closed before response".into()));
                }
            }
        }
    }
}

/// True if the reply echoes the given request number.
fn correlates(reply: &ServerMessage, request: u64) -> bool {
    match reply {
        ServerMessage::UpsertOk { request: echoed, .. }
        | ServerMessage::ListOk { request: echoed, .. }
        | ServerMessage::DeleteOk { request: echoed } => *echoed == request,
        ServerMessage::Error { request: echoed, .. } => *echoed == Some(request),
        ServerMessage::Pong { .. } => false,
    }
}

fn protocol_violation(request: u64, reply: &ServerMessage) -> Error {
    Error::Transport(format!(
        "unexpected reply to request {request}: {reply:?}"
    ))
}
