//! UseCase layer: the hub's operations on top of the registry.

pub mod broadcast_message;
pub mod connect_connection;
pub mod disconnect_connection;
pub mod error;
pub mod list_connections;

pub use broadcast_message::{BroadcastMessageUseCase, BroadcastReport};
pub use connect_connection::ConnectConnectionUseCase;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::ConnectError;
pub use list_connections::ListConnectionsUseCase;
