//! WebSocket broadcast relay library.
//!
//! The relay accepts many concurrent WebSocket connections and forwards every
//! inbound frame, unchanged, to the connected peers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;

pub use config::HubConfig;
pub use ui::{BindError, Hub, HubHandle};
