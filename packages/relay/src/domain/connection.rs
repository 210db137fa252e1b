//! Connection identity and lifecycle.
//!
//! ```text
//! Connecting ──> Open ──> Closing ──> Closed
//!     │            │                    ▲
//!     └────────────┴────────────────────┘
//! ```
//!
//! `Closed` is terminal. Any transport error from `Open` goes straight to `Closed`.

use std::fmt;

use uuid::Uuid;

use super::StateTransitionError;

/// Opaque identifier assigned by the hub when an upgrade succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Lifecycle state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ConnectionState {
    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Connecting, Open)
                | (Connecting, Closed)
                | (Open, Closing)
                | (Open, Closed)
                | (Closing, Closed)
        )
    }
}

/// One peer of the hub
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    state: ConnectionState,
    connected_at: Timestamp,
}

impl Connection {
    /// A connection whose upgrade has not completed yet
    pub fn connecting(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            state: ConnectionState::Connecting,
            connected_at,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Upgrade completed
    pub fn mark_open(&mut self) -> Result<(), StateTransitionError> {
        self.transition(ConnectionState::Open)
    }

    /// Either peer started the close handshake
    pub fn begin_close(&mut self) -> Result<(), StateTransitionError> {
        self.transition(ConnectionState::Closing)
    }

    /// Move to the terminal state.
    ///
    /// Returns `false` when the connection was already closed.
    pub fn mark_closed(&mut self) -> bool {
        if self.state == ConnectionState::Closed {
            return false;
        }
        self.state = ConnectionState::Closed;
        true
    }

    fn transition(&mut self, next: ConnectionState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(StateTransitionError {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
