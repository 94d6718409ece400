use std::fmt;

use geo_traits::CoordTrait;

use crate::r#type::QuadNum;

/// A 2D coordinate pair stored in a [`Quadtree`][crate::Quadtree].
///
/// Equality is exact component equality, without any epsilon tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<N: QuadNum = f64> {
    /// x coordinate
    pub x: N,
    /// y coordinate
    pub y: N,
}

impl<N: QuadNum> Point<N> {
    /// Construct a new point.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Construct a point from any coordinate implementing [`CoordTrait`].
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self::new(coord.x(), coord.y())
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> N {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `true` if `other` is a different point strictly closer than `distance`.
    ///
    /// A point never overlaps itself, and neither do exact duplicates.
    #[inline]
    pub fn overlaps(&self, other: &Self, distance: N) -> bool {
        self != other && self.distance_to(other) < distance
    }
}

impl<N: QuadNum> From<(N, N)> for Point<N> {
    fn from((x, y): (N, N)) -> Self {
        Self::new(x, y)
    }
}

impl<N: QuadNum> From<[N; 2]> for Point<N> {
    fn from([x, y]: [N; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<N: QuadNum> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
