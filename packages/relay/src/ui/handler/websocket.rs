//! WebSocket connection handlers.
//!
//! Every upgraded connection runs two tasks:
//!
//! - a reader, which hands each inbound frame to the broadcast use case
//! - a writer (`pusher_loop`), which drains the connection's queue into the socket
//!
//! When either one finishes the other is aborted and the connection is removed
//! from the registry.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{
            CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code,
            rejection::WebSocketUpgradeRejection,
        },
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, OutboundFrame, Payload},
    ui::{error::UpgradeError, state::AppState},
};

/// Why a connection's tasks stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionExit {
    /// The peer sent a close frame
    PeerClosed,
    /// The inbound stream ended without a close frame
    StreamEnded,
    /// Reading from the socket failed
    ReadFailed,
    /// Writing to the socket failed
    WriteFailed,
    /// Writing to the socket did not complete within the send timeout
    WriteTimedOut,
    /// The hub is shutting down
    Shutdown,
    /// The outbound queue was closed
    QueueClosed,
    /// The task panicked or was cancelled
    Aborted,
}

impl ConnectionExit {
    /// Whether a close handshake was started by either side
    fn is_close_handshake(self) -> bool {
        matches!(self, ConnectionExit::PeerClosed | ConnectionExit::Shutdown)
    }
}

pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!("{}", UpgradeError::Rejected(rejection.body_text()));
            return rejection.into_response();
        }
    };

    ws.on_failed_upgrade(|e: axum::Error| {
        tracing::warn!("{}", UpgradeError::Handshake(e.to_string()));
    })
    .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut connection = match state.connect_usecase.execute(tx).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!("Failed to register connection: {}", e);
            return;
        }
    };
    let id = connection.id();
    tracing::info!("Connection '{}' opened", id);

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender, state.send_timeout, id);
    let mut recv_task = receiver_loop(receiver, state.clone(), id);

    // If any one of the tasks completes, abort the other
    let exit = tokio::select! {
        result = &mut recv_task => {
            send_task.abort();
            result.unwrap_or(ConnectionExit::Aborted)
        }
        result = &mut send_task => {
            recv_task.abort();
            result.unwrap_or(ConnectionExit::Aborted)
        }
    };

    if exit.is_close_handshake()
        && let Err(e) = connection.begin_close()
    {
        tracing::debug!("Connection '{}': {}", id, e);
    }
    connection.mark_closed();

    state.disconnect_usecase.execute(&id).await;
    tracing::info!("Connection '{}' closed ({:?})", id, exit);
}

/// Spawns a task that forwards every inbound frame of `id` to the broadcast use case.
///
/// Frames are handled one at a time, so a sender's messages go out in the order
/// they arrived.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    id: ConnectionId,
) -> JoinHandle<ConnectionExit> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("Connection '{}' read error: {}", id, e);
                    return ConnectionExit::ReadFailed;
                }
            };

            let payload = match msg {
                Message::Text(text) => Payload::Text(text.as_str().to_owned()),
                Message::Binary(data) => Payload::Binary(data.to_vec()),
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    continue;
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", id);
                    return ConnectionExit::PeerClosed;
                }
            };

            tracing::debug!("Received {} bytes from '{}'", payload.len(), id);
            let report = state.broadcast_usecase.execute(&id, payload).await;
            tracing::debug!(
                "Relayed message from '{}' to {} connection(s), dropped {}",
                id,
                report.delivered.len(),
                report.dropped.len()
            );
        }

        ConnectionExit::StreamEnded
    })
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// Each write is bounded by `send_timeout`; a peer that stops reading is
/// disconnected instead of stalling its queue forever.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: SplitSink<WebSocket, Message>,
    send_timeout: Duration,
    id: ConnectionId,
) -> JoinHandle<ConnectionExit> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let (msg, exit_after) = match frame {
                OutboundFrame::Payload(Payload::Text(text)) => (Message::Text(text.into()), None),
                OutboundFrame::Payload(Payload::Binary(data)) => {
                    (Message::Binary(data.into()), None)
                }
                OutboundFrame::Close => (
                    Message::Close(Some(CloseFrame {
                        code: close_code::AWAY,
                        reason: Utf8Bytes::from_static("relay shutting down"),
                    })),
                    Some(ConnectionExit::Shutdown),
                ),
            };

            match tokio::time::timeout(send_timeout, sender.send(msg)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Connection '{}' write error: {}", id, e);
                    return exit_after.unwrap_or(ConnectionExit::WriteFailed);
                }
                Err(_) => {
                    tracing::warn!(
                        "Connection '{}' write timed out after {:?}",
                        id,
                        send_timeout
                    );
                    return exit_after.unwrap_or(ConnectionExit::WriteTimedOut);
                }
            }

            if let Some(exit) = exit_after {
                return exit;
            }
        }

        ConnectionExit::QueueClosed
    })
}
