//! Insert random points into a quadtree over several rounds and count overlapping points.
//!
//! Usage: `quadtree-rounds [config.toml]`

use region_quadtree::rounds::{run_rounds, RoundsConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "quadtree-rounds.toml".to_string());
    let config = RoundsConfig::load(&path)?;
    info!(
        rounds = config.rounds,
        points = config.points_per_round,
        capacity = config.capacity,
        "Loaded configuration"
    );

    for report in run_rounds(&config)? {
        println!(
            "Round {}: Found {} overlapping points",
            report.round, report.overlaps
        );
    }

    Ok(())
}
