//! CLI test client for the broadcast relay.

pub mod error;
pub mod formatter;
pub mod session;

pub use error::ClientError;
pub use session::run_client_session;
