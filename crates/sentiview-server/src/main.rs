//! SentiView mock service: fabricates demo payloads for local development.

mod envelope;
mod fabricate;
mod routes;

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Mock sentiment demo service.
#[derive(Parser, Debug)]
#[command(name = "sentiview-server", version, about)]
struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, default_value = "8080", env = "SENTIVIEW_PORT")]
    port: u16,

    /// Seed for the payload fabricator; a fixed seed replays identical
    /// responses across runs.
    #[arg(long, default_value = "0", env = "SENTIVIEW_SEED")]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::parse();
    let app = routes::router(config.seed);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!(port = config.port, seed = config.seed, "demo service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
