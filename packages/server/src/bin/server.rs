//! Vibes playlist synchronization server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin vibes-server -- --port 4201
//! ```

use clap::Parser;
use vibes_server::{ServerArgs, ServerConfig};
use vibes_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);
    tracing::info!("Starting server with {:?}", config);

    // Run the server
    if let Err(e) = vibes_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
