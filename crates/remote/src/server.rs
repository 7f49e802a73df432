// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Handles client connections and message routing. The protocol is plain
//! request/response: every readable frame gets exactly one reply, and a
//! failed request answers with an error frame while the connection stays
//! up.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};

use fleet_core::protocol::{ClientMessage, ServerMessage};

use crate::state::ServerState;

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", addr);

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        match ws_stream.next().await {
            Some(Ok(Message::Text(text))) => {
                let response = handle_client_message(&text, &state).await;
                let json = response.to_json()?;
                ws_sink.send(Message::Text(json.into())).await?;
            }
            Some(Ok(Message::Close(_))) => {
                info!("Client {} disconnected", peer_addr);
                break;
            }
            Some(Ok(Message::Ping(data))) => {
                ws_sink.send(Message::Pong(data)).await?;
            }
            Some(Ok(_)) => {
                // Ignore other message types (Binary, Pong, Frame)
            }
            Some(Err(e)) => {
                error!("WebSocket error from {}: {}", peer_addr, e);
                break;
            }
            None => {
                info!("Client {} stream ended", peer_addr);
                break;
            }
        }
    }

    info!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process one client frame and produce its reply.
pub(crate) async fn handle_client_message(text: &str, state: &ServerState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            return ServerMessage::error(None, format!("malformed frame: {e}"));
        }
    };
    debug!("Received message: {:?}", msg);

    match msg {
        ClientMessage::Upsert {
            request,
            id,
            fields,
        } => match state.upsert(id, fields).await {
            Ok(id) => {
                debug!("Upsert applied as {}", id);
                ServerMessage::upsert_ok(request, id)
            }
            Err(e) => ServerMessage::error(Some(request), e.to_string()),
        },

        ClientMessage::List { request } => {
            let documents = state.list().await;
            debug!("List response: {} documents", documents.len());
            ServerMessage::list_ok(request, documents)
        }

        ClientMessage::Delete { request, id } => match state.delete(&id).await {
            Ok(existed) => {
                debug!("Delete {} (existed: {})", id, existed);
                ServerMessage::delete_ok(request)
            }
            Err(e) => ServerMessage::error(Some(request), e.to_string()),
        },

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            ServerMessage::pong(id)
        }
    }
}
