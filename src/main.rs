use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use hospital_grid::clustering::ClusteringEngine;
use hospital_grid::environment::ServerConfig;
use hospital_grid::logging::configure_logging;
use hospital_grid::web::{serve, shared_engine};
use hospital_grid::TARGET_WEB_REQUEST;

#[derive(Parser)]
#[clap(name = "hospital-grid", about = "Stepwise k-means server for houses and hospitals")]
struct Cli {
    /// Port to listen on (defaults to $PORT or 8080)
    #[clap(short, long)]
    port: Option<u16>,

    /// Address to bind (defaults to $BIND_ADDRESS or 0.0.0.0)
    #[clap(short, long)]
    bind: Option<String>,

    /// Initial grid side (defaults to $GRID_SIZE or 10)
    #[clap(short, long)]
    grid: Option<usize>,

    /// Seed for reproducible runs (defaults to $KMEANS_SEED)
    #[clap(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(grid) = cli.grid {
        config.grid_size = grid;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let grid = i64::try_from(config.grid_size).context("grid size is too large")?;
    let engine = match config.seed {
        Some(seed) => ClusteringEngine::with_grid_and_seed(grid, seed),
        None => ClusteringEngine::with_grid(grid),
    }
    .context("Failed to create clustering engine")?;

    info!(
        target: TARGET_WEB_REQUEST,
        "Starting with a {}x{} grid (seed: {:?})",
        config.grid_size, config.grid_size, config.seed
    );

    serve(&config, shared_engine(engine)).await
}
