//! Domain layer: connections, payloads and the registry contract.

pub mod connection;
pub mod error;
pub mod message;
pub mod registry;

pub use connection::{Connection, ConnectionId, ConnectionState, Timestamp};
pub use error::{RegistryError, SendError, StateTransitionError};
pub use message::{DeliveryPolicy, OutboundFrame, Payload, PusherChannel};
pub use registry::{ConnectionHandle, ConnectionRegistry};

#[cfg(test)]
pub use registry::MockConnectionRegistry;
