//! wireserve Server Binary
//!
//! Binds the listener and serves framed GET/BOUNCE/EXIT sessions until
//! interrupted.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wireserve::{Config, Server};

/// wireserve Server
#[derive(Parser, Debug)]
#[command(name = "wireserve-server")]
#[command(about = "Framed request/response file server")]
#[command(version)]
struct Args {
    /// IP to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Directory served by the GET command
    #[arg(short, long, default_value = "./static")]
    static_dir: String,

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

    tracing::info!("wireserve Server v{}", wireserve::VERSION);
    tracing::debug!(
        "Command input. debug: {} - host: {} - port: {}",
        args.debug,
        args.host,
        args.port
    );

    // Build config from args
    let config = Config::builder()
        .addr(format!("{}:{}", args.host, args.port))
        .static_root(&args.static_dir)
        .build();

    // Bind before installing the interrupt handler so an invalid address
    // fails fast with a nonzero exit
    let server = match Server::bind(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    let shutdown = server.shutdown_token();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Server stopped by interrupt.");
        shutdown.cancel();
    }) {
        tracing::error!("Failed to install interrupt handler: {e}");
        std::process::exit(1);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
