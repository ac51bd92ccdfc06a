//! wireserve Client Binary
//!
//! Connects to a wireserve server and runs the interactive command loop.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wireserve::{Client, Config, ShutdownToken};

/// wireserve Client
#[derive(Parser, Debug)]
#[command(name = "wireserve-client")]
#[command(about = "Interactive client for the wireserve file server")]
#[command(version)]
struct Args {
    /// IP to connect to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to connect to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Show debug data
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.debug { "info,wireserve=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(
        "Command input. debug: {} - host: {} - port: {}",
        args.debug,
        args.host,
        args.port
    );

    let config = Config::builder()
        .addr(format!("{}:{}", args.host, args.port))
        .build();

    let interrupt = ShutdownToken::new();
    let handler_token = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        // Closes the connection and ends the process without sending
        // further frames
        println!();
        tracing::info!("Client stopped by interrupt.");
        handler_token.cancel();
        std::process::exit(0);
    }) {
        tracing::error!("Failed to install interrupt handler: {e}");
        std::process::exit(1);
    }

    let mut client = match Client::connect(config, interrupt) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = client.run() {
        tracing::error!("Something happened, closing: {e}");
        std::process::exit(1);
    }
}
