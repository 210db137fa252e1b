//! Errors surfaced by the server layer.

use std::io;

use thiserror::Error;

/// The listening socket could not be opened. Fatal at startup.
#[derive(Debug, Error)]
#[error("Failed to bind relay to {addr}: {source}")]
pub struct BindError {
    pub addr: String,
    #[source]
    pub source: io::Error,
}

/// An inbound transport could not be promoted to a WebSocket.
///
/// The transport is dropped; nothing is registered.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// The request is not a valid upgrade request
    #[error("Upgrade request rejected: {0}")]
    Rejected(String),

    /// The HTTP upgrade itself failed
    #[error("Upgrade handshake failed: {0}")]
    Handshake(String),
}
