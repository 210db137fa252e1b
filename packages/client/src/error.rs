//! Error types for the relay client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake with the relay failed
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// The connection broke after it was established
    #[error("Connection error: {0}")]
    Connection(String),

    /// Reading stdin failed
    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}
