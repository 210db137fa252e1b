//! Utilities shared by the relay server and the CLI client.

pub mod logger;
pub mod time;
