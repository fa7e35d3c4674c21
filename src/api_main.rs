//! Gridiron API Server Binary

use clap::Parser;
use gridiron::{api::ApiServer, GridironConfig, GridironResult};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gridiron-api")]
#[command(about = "Football game simulation API server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// API server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// API server port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Allowed CORS origins (comma-separated, use * for all)
    #[arg(long)]
    cors_origins: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seed every game with this value
    #[arg(long)]
    seed: Option<u64>,

    /// Include the play-by-play log in responses by default
    #[arg(long)]
    include_log: bool,
}

#[tokio::main]
async fn main() -> GridironResult<()> {
    gridiron::init_tracing("gridiron=info,gridiron_api=info,tower_http=info");
    let args = Args::parse();

    let mut config = GridironConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(origins) = args.cors_origins {
        config.server.allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
    }
    if let Some(timeout) = args.timeout {
        config.server.request_timeout_secs = timeout;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.simulation.include_play_log |= args.include_log;
    config.validate()?;

    if let Some(path) = &args.config {
        info!("📂 Loaded configuration from {}", path.display());
    }

    ApiServer::new(config).run().await
}
