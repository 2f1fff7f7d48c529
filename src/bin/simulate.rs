use anyhow::Result;
use clap::Parser;
use prettytable::{Cell, Row, Table};

use hospital_grid::clustering::ClusteringEngine;
use hospital_grid::logging::configure_cli_logging;

#[derive(Parser)]
#[clap(name = "simulate", about = "Run a fixed number of k-means steps offline")]
struct Cli {
    /// Grid side
    #[clap(short, long, default_value = "10")]
    grid: i64,

    /// Number of houses
    #[clap(short = 'n', long, default_value = "30")]
    houses: i64,

    /// Number of hospitals
    #[clap(short = 'a', long, default_value = "3")]
    hospitals: i64,

    /// Number of assign + update rounds
    #[clap(short, long, default_value = "5")]
    steps: usize,

    /// Seed for a reproducible run
    #[clap(long)]
    seed: Option<u64>,

    /// Log each step
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_cli_logging(cli.verbose);

    let mut engine = match cli.seed {
        Some(seed) => ClusteringEngine::with_grid_and_seed(cli.grid, seed)?,
        None => ClusteringEngine::with_grid(cli.grid)?,
    };
    engine.generate_points(cli.houses)?;
    engine.generate_centroids(cli.hospitals)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Step"),
        Cell::new("Avg distance"),
        Cell::new("Inertia"),
    ]));

    for step in 1..=cli.steps {
        engine.assign_step()?;
        let metrics = engine.metrics();
        table.add_row(Row::new(vec![
            Cell::new(&step.to_string()),
            Cell::new(&format!("{:.2}", metrics.average_distance)),
            Cell::new(&format!("{:.2}", metrics.inertia)),
        ]));
        engine.update_step()?;
    }
    table.printstd();

    let mut hospitals = Table::new();
    hospitals.add_row(Row::new(vec![
        Cell::new("Hospital"),
        Cell::new("X"),
        Cell::new("Y"),
    ]));
    for (idx, hospital) in engine.hospitals().unwrap_or_default().iter().enumerate() {
        hospitals.add_row(Row::new(vec![
            Cell::new(&idx.to_string()),
            Cell::new(&format!("{:.2}", hospital[0])),
            Cell::new(&format!("{:.2}", hospital[1])),
        ]));
    }
    hospitals.printstd();

    Ok(())
}
