//! Hello-world HTTP server.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use boxing_ring::config::logging::init_tracing;
use boxing_ring::{http::create_app, Settings};

#[derive(Parser, Debug)]
#[command(name = "hello", about = "Minimal hello-world HTTP service")]
struct Args {
    /// Port to listen on (defaults to the settings file value)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "BOXING_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

/// Completes when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, std::io::stdout);

    let port = match args.port {
        Some(port) => port,
        None => Settings::load_or_default().http_port,
    };

    let addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, create_app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
