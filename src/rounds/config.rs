//! Rounds driver configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::proximity::ProximityOptions;
use crate::quadtree::DEFAULT_CAPACITY;

/// Configuration for [`run_rounds`][crate::rounds::run_rounds].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoundsConfig {
    /// Number of rounds to run.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Random points generated and inserted per round.
    #[serde(default = "default_points_per_round")]
    pub points_per_round: usize,
    /// Width of the domain. Points lie in `(0, width)`.
    #[serde(default = "default_extent")]
    pub width: f64,
    /// Height of the domain. Points lie in `(0, height)`.
    #[serde(default = "default_extent")]
    pub height: f64,
    /// Points per node before splitting.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Optional depth limit for the tree.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Seed for reproducible runs. Uses OS entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub proximity: ProximityOptions,
}

fn default_rounds() -> usize {
    5
}

fn default_points_per_round() -> usize {
    20_000
}

fn default_extent() -> f64 {
    200.0
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for RoundsConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            points_per_round: default_points_per_round(),
            width: default_extent(),
            height: default_extent(),
            capacity: default_capacity(),
            max_depth: None,
            seed: None,
            proximity: ProximityOptions::default(),
        }
    }
}

impl RoundsConfig {
    /// Load configuration from a TOML file, or use defaults if it doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No {} found, using default config", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_toml_uses_defaults() {
        let config: RoundsConfig = toml::from_str(
            r#"
            rounds = 2
            seed = 17

            [proximity]
            overlap_distance = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.rounds, 2);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.points_per_round, 20_000);
        assert_eq!(config.capacity, 4);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.proximity.overlap_distance, 1.5);
        assert_eq!(config.proximity.window_half_extent, 10.0);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: RoundsConfig = toml::from_str("").unwrap();
        assert_eq!(config, RoundsConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let config = RoundsConfig::load("does-not-exist/rounds.toml").unwrap();
        assert_eq!(config, RoundsConfig::default());
    }
}
