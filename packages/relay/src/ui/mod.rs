//! WebSocket relay server implementation.

mod error;
mod handler;
mod server;
pub mod signal;
pub mod state;

pub use error::{BindError, UpgradeError};
pub use server::{Hub, HubHandle};
