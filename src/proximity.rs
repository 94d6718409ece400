//! Counting overlapping points with quadtree window queries.
//!
//! [`ProximityOptions`] are plain `f64` so they can be read from configuration files; they are
//! cast into the tree's coordinate type when counting.

use num_traits::NumCast;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::quadtree::Quadtree;
use crate::r#type::QuadNum;
use crate::rectangle::Rectangle;

/// Parameters for [`count_overlaps`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ProximityOptions {
    /// Half-extent of the square query window centered on each point.
    #[serde(default = "default_window_half_extent")]
    pub window_half_extent: f64,
    /// Two distinct points closer than this overlap.
    #[serde(default = "default_overlap_distance")]
    pub overlap_distance: f64,
}

fn default_window_half_extent() -> f64 {
    10.0
}

fn default_overlap_distance() -> f64 {
    3.0
}

impl ProximityOptions {
    /// The window half-extent and overlap distance in coordinate type `N`.
    fn cast<N: QuadNum>(&self) -> (N, N) {
        let cast = |value: f64| <N as NumCast>::from(value).unwrap_or_else(N::nan);
        (cast(self.window_half_extent), cast(self.overlap_distance))
    }
}

impl Default for ProximityOptions {
    fn default() -> Self {
        Self {
            window_half_extent: default_window_half_extent(),
            overlap_distance: default_overlap_distance(),
        }
    }
}

/// Count, for every point in `points`, the other points in `tree` that overlap it.
///
/// Each overlapping pair is counted once from each side. The query window should be at least as
/// large as the overlap distance, or overlaps near the window edge are missed.
pub fn count_overlaps<N: QuadNum>(
    tree: &Quadtree<N>,
    points: &[Point<N>],
    options: &ProximityOptions,
) -> u64 {
    let (half_extent, distance) = options.cast();
    let mut found = Vec::new();
    points
        .iter()
        .map(|point| {
            found.clear();
            overlaps_of(tree, point, half_extent, distance, &mut found)
        })
        .sum()
}

/// Parallel version of [`count_overlaps`]. Returns the same count.
#[cfg(feature = "rayon")]
pub fn par_count_overlaps<N: QuadNum>(
    tree: &Quadtree<N>,
    points: &[Point<N>],
    options: &ProximityOptions,
) -> u64 {
    let (half_extent, distance) = options.cast();
    points
        .par_iter()
        .map_init(Vec::new, |found, point| {
            found.clear();
            overlaps_of(tree, point, half_extent, distance, found)
        })
        .sum()
}

fn overlaps_of<N: QuadNum>(
    tree: &Quadtree<N>,
    point: &Point<N>,
    half_extent: N,
    distance: N,
    found: &mut Vec<Point<N>>,
) -> u64 {
    let window = Rectangle::new(*point, half_extent, half_extent);
    tree.query_into(&window, found);
    found
        .iter()
        .filter(|other| point.overlaps(other, distance))
        .count() as u64
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn brute_force(points: &[Point], distance: f64) -> u64 {
        let mut count = 0;
        for a in points {
            for b in points {
                if a.overlaps(b, distance) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn counts_pairs_from_both_sides() {
        let points = [
            Point::new(10.0, 10.0),
            Point::new(11.0, 11.0),
            Point::new(50.5, 40.0),
            // duplicates never overlap each other
            Point::new(80.0, 80.0),
            Point::new(80.0, 80.0),
        ];
        let mut tree = Quadtree::new(50.0, 50.0, 50.0, 50.0, 2).unwrap();
        tree.extend(points).unwrap();

        assert_eq!(count_overlaps(&tree, &points, &ProximityOptions::default()), 2);
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(99);
        let points: Vec<Point> = (0..2_000)
            .map(|_| Point::new(rng.gen_range(0.1..199.9), rng.gen_range(0.1..199.9)))
            .collect();
        let mut tree = Quadtree::new(100.0, 100.0, 100.0, 100.0, 4).unwrap();
        tree.extend(points.iter().copied()).unwrap();

        let options = ProximityOptions::default();
        let expected = brute_force(&points, options.overlap_distance);
        assert!(expected > 0);
        assert_eq!(count_overlaps(&tree, &points, &options), expected);

        #[cfg(feature = "rayon")]
        assert_eq!(par_count_overlaps(&tree, &points, &options), expected);
    }

    #[test]
    fn single_precision() {
        let points = [
            Point::new(10.0f32, 10.0),
            Point::new(12.0, 10.0),
            Point::new(30.0, 30.0),
        ];
        let mut tree = Quadtree::<f32>::new(50.0, 50.0, 50.0, 50.0, 1).unwrap();
        tree.extend(points).unwrap();

        assert_eq!(count_overlaps(&tree, &points, &ProximityOptions::default()), 2);
    }
}
