//! Room-based WebSocket chat relay server.
//!
//! Clients join named rooms over `/ws`, exchange chat messages and shared
//! location links, and receive a live roster on every change. Static assets
//! for the browser client are served from the public directory.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! PORT=3000 cargo run --bin server -- --host 0.0.0.0
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use chat_relay::{
    filter::WordFilter,
    logger::setup_logger,
    registry::RoomRegistry,
    server::{run_server, state::AppState},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Directory of static assets served at the root path
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // The registry is owned here and injected into the gateway; nothing else
    // holds a handle to it.
    let state = Arc::new(AppState::new(RoomRegistry::new(), WordFilter::new()));

    if let Err(e) = run_server(args.host, args.port, args.public_dir, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
