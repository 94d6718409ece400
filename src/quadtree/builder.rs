use crate::error::{QuadtreeError, Result};
use crate::point::Point;
use crate::quadtree::Quadtree;
use crate::r#type::QuadNum;
use crate::rectangle::Rectangle;

/// The number of points a node holds directly before it splits, unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 4;

/// A builder to create a [`Quadtree`].
#[derive(Debug, Clone)]
pub struct QuadtreeBuilder<N: QuadNum = f64> {
    bounds: Rectangle<N>,
    capacity: usize,
    max_depth: Option<usize>,
}

impl<N: QuadNum> QuadtreeBuilder<N> {
    /// Create a new builder for a root node centered on `(x, y)` with the given half-extents.
    pub fn new(x: N, y: N, half_width: N, half_height: N) -> Self {
        Self::from_bounds(Rectangle::new(Point::new(x, y), half_width, half_height))
    }

    /// Create a new builder for a root node with the given bounds.
    pub fn from_bounds(bounds: Rectangle<N>) -> Self {
        Self {
            bounds,
            capacity: DEFAULT_CAPACITY,
            max_depth: None,
        }
    }

    /// Set the number of points each node holds directly before it splits.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Stop splitting at `max_depth` (the root is at depth 0).
    ///
    /// Nodes at this depth keep every point routed to them in their own buffer, even beyond
    /// capacity. Without a limit, many coincident points keep forcing splits indefinitely.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Validate the parameters and create an empty tree.
    pub fn build(self) -> Result<Quadtree<N>> {
        if self.capacity == 0 {
            return Err(QuadtreeError::InvalidParameter(
                "capacity must be at least 1".to_string(),
            ));
        }

        let Rectangle {
            center,
            half_width,
            half_height,
        } = self.bounds;
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(QuadtreeError::InvalidParameter(format!(
                "center must be finite, got ({:?}, {:?})",
                center.x, center.y
            )));
        }
        for (name, value) in [("half_width", half_width), ("half_height", half_height)] {
            if !(value.is_finite() && value > N::zero()) {
                return Err(QuadtreeError::InvalidParameter(format!(
                    "{} must be finite and positive, got {:?}",
                    name, value
                )));
            }
        }

        Ok(Quadtree::from_parts(
            self.bounds,
            self.capacity,
            self.max_depth,
        ))
    }
}
