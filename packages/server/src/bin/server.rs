//! Moderated group chat relay server.
//!
//! Run with:
//! ```not_rust
//! PORT=8080 cargo run --bin moderated-chat-server
//! ```

use clap::Parser;
use moderated_chat_server::ServerConfig;
use moderated_chat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = moderated_chat_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
