//! Repeated rounds of random insertion and overlap counting.

mod config;

pub use config::RoundsConfig;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::Result;
use crate::point::Point;
use crate::proximity;
use crate::quadtree::{Quadtree, QuadtreeBuilder};

/// The outcome of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    /// Zero-based round number.
    pub round: usize,
    /// Number of points inserted.
    pub points: usize,
    /// Number of overlapping (point, other) pairs, counted from both sides.
    pub overlaps: u64,
    /// Number of tree nodes before the tree was cleared.
    pub nodes: usize,
    /// Depth of the tree before it was cleared.
    pub depth: usize,
}

/// Run `config.rounds` rounds over a single tree spanning `(0, width) x (0, height)`.
///
/// Each round inserts fresh random points, counts overlaps and clears the tree again.
pub fn run_rounds(config: &RoundsConfig) -> Result<Vec<RoundReport>> {
    let half_width = config.width / 2.0;
    let half_height = config.height / 2.0;
    let mut builder = QuadtreeBuilder::new(half_width, half_height, half_width, half_height)
        .capacity(config.capacity);
    if let Some(max_depth) = config.max_depth {
        builder = builder.max_depth(max_depth);
    }
    let mut tree = builder.build()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut points = Vec::with_capacity(config.points_per_round);
    let mut reports = Vec::with_capacity(config.rounds);
    for round in 0..config.rounds {
        for _ in 0..config.points_per_round {
            let point = random_point(&mut rng, &tree, config.width, config.height);
            tree.insert(point)?;
            points.push(point);
        }
        debug!(round, nodes = tree.num_nodes(), depth = tree.depth(), "built tree");

        let overlaps = count(&tree, &points, config);
        let report = RoundReport {
            round,
            points: points.len(),
            overlaps,
            nodes: tree.num_nodes(),
            depth: tree.depth(),
        };
        info!(round, overlaps, "round finished");
        reports.push(report);

        tree.clear();
        points.clear();
    }
    Ok(reports)
}

/// A uniformly random point strictly inside the root bounds.
fn random_point(rng: &mut StdRng, tree: &Quadtree, width: f64, height: f64) -> Point {
    loop {
        let point = Point::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
        if tree.bounds().contains(&point) {
            return point;
        }
    }
}

#[cfg(not(feature = "rayon"))]
fn count(tree: &Quadtree, points: &[Point], config: &RoundsConfig) -> u64 {
    proximity::count_overlaps(tree, points, &config.proximity)
}

#[cfg(feature = "rayon")]
fn count(tree: &Quadtree, points: &[Point], config: &RoundsConfig) -> u64 {
    proximity::par_count_overlaps(tree, points, &config.proximity)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::QuadtreeError;

    fn small_config() -> RoundsConfig {
        RoundsConfig {
            rounds: 3,
            points_per_round: 2_000,
            seed: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn runs_every_round() {
        let reports = run_rounds(&small_config()).unwrap();
        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.round, i);
            assert_eq!(report.points, 2_000);
            assert!(report.overlaps > 0);
            assert!(report.nodes > 1);
            assert_eq!((report.nodes - 1) % 4, 0);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = small_config();
        assert_eq!(run_rounds(&config).unwrap(), run_rounds(&config).unwrap());
    }

    #[test]
    fn max_depth_is_applied() {
        let config = RoundsConfig {
            max_depth: Some(2),
            ..small_config()
        };
        for report in run_rounds(&config).unwrap() {
            assert_eq!(report.depth, 2);
            assert_eq!(report.nodes, 1 + 4 + 16);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RoundsConfig {
            capacity: 0,
            ..small_config()
        };
        assert!(matches!(
            run_rounds(&config),
            Err(QuadtreeError::InvalidParameter(_))
        ));
    }
}
