//! Simple relay test client.
//!
//! Connects to the relay, optionally sends a JSON greeting, prints every message
//! it receives and sends each line typed on stdin as a text frame.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin engawa-client -- --name "Client 1" --greet
//! cargo run --bin engawa-client -- -u ws://127.0.0.1:4000 -n "Client 2"
//! ```

use clap::Parser;

use engawa_client::run_client_session;
use engawa_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "engawa-client")]
#[command(about = "Test client for the WebSocket broadcast relay", long_about = None)]
struct Args {
    /// Relay URL
    #[arg(short = 'u', long, env = "RELAY_URL", default_value = "ws://127.0.0.1:4000")]
    url: String,

    /// Name shown in the greeting and in printed output
    #[arg(short = 'n', long, default_value = "client")]
    name: String,

    /// Send `{"type":"message","content":"Hello from <name>!"}` after connecting
    #[arg(long)]
    greet: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url, &args.name, args.greet).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
