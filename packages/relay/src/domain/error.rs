//! Domain errors.

use thiserror::Error;

use super::ConnectionState;

/// Errors raised by a connection registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The connection id is already present in the registry
    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Per-recipient delivery failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The recipient's outbound queue is gone (its writer has stopped)
    #[error("Connection '{0}' is closed")]
    ChannelClosed(String),
}

/// Invalid lifecycle transition for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid connection state transition: {from:?} -> {to:?}")]
pub struct StateTransitionError {
    pub from: ConnectionState,
    pub to: ConnectionState,
}
