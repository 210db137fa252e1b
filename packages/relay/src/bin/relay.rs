//! WebSocket broadcast relay.
//!
//! Receives messages from clients and rebroadcasts them to all connected clients
//! (the sender included, unless `--exclude-sender` is given).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin engawa-relay
//! cargo run --bin engawa-relay -- --host 0.0.0.0 --port 3000 --exclude-sender
//! PORT=8080 cargo run --bin engawa-relay
//! ```

use std::time::Duration;

use clap::Parser;

use engawa_relay::{
    Hub, HubConfig,
    config::{DEFAULT_HOST, DEFAULT_PORT},
    ui::signal::shutdown_signal,
};
use engawa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "engawa-relay")]
#[command(about = "WebSocket relay that rebroadcasts every message to all connected clients", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Do not echo a message back to the client that sent it
    #[arg(long, env = "RELAY_EXCLUDE_SENDER")]
    exclude_sender: bool,

    /// Seconds a single write to a client may take before it is disconnected
    #[arg(long, env = "RELAY_SEND_TIMEOUT_SECS", default_value_t = 10)]
    send_timeout_secs: u64,

    /// Seconds to wait for connections to close on shutdown
    #[arg(long, env = "RELAY_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    shutdown_timeout_secs: u64,
}

impl From<Args> for HubConfig {
    fn from(args: Args) -> Self {
        HubConfig {
            host: args.host,
            port: args.port,
            include_sender: !args.exclude_sender,
            send_timeout: Duration::from_secs(args.send_timeout_secs),
            shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let handle = match Hub::new(HubConfig::from(args)).start().await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    shutdown_signal().await;
    handle.shutdown().await;
}
