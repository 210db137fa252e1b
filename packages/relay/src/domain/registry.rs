//! ConnectionRegistry trait 定義
//!
//! The live set of OPEN connections. The use-case layer depends on this trait
//! only; the concrete store lives in the infrastructure layer.

use async_trait::async_trait;

use super::{ConnectionId, OutboundFrame, PusherChannel, RegistryError, SendError, Timestamp};

/// A registered connection: its id plus the queue feeding its writer
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    channel: PusherChannel,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, connected_at: Timestamp, channel: PusherChannel) -> Self {
        Self {
            id,
            connected_at,
            channel,
        }
    }

    /// Queue a frame for this connection's writer.
    ///
    /// Never blocks. Fails only once the writer has gone away.
    pub fn send(&self, frame: OutboundFrame) -> Result<(), SendError> {
        self.channel
            .send(frame)
            .map_err(|_| SendError::ChannelClosed(self.id.to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }
}

/// Connection Registry trait
///
/// Invariants every implementation upholds:
///
/// - a connection is present iff it is OPEN
/// - `register` inserts exactly once; a duplicate id is rejected
/// - `unregister` is idempotent: removing an absent id is a no-op returning `false`
/// - `snapshot` returns a consistent copy; callers never hold the registry lock while sending
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Add an OPEN connection
    async fn register(&self, handle: ConnectionHandle) -> Result<(), RegistryError>;

    /// Remove a connection. Returns `true` if it was present.
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// Copy of every registered connection
    async fn snapshot(&self) -> Vec<ConnectionHandle>;

    /// Number of registered connections
    async fn count(&self) -> usize;

    async fn contains(&self, id: &ConnectionId) -> bool;
}
