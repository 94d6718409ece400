use std::fmt;

use geo_traits::RectTrait;
use tinyvec::TinyVec;
use tracing::{debug, trace};

use crate::error::{QuadtreeError, Result};
use crate::point::Point;
use crate::quadtree::{Node, QuadtreeBuilder};
use crate::r#type::QuadNum;
use crate::rectangle::{Quadrant, Rectangle};

pub(crate) const ROOT: usize = 0;

/// Storage for a single node of the tree.
#[derive(Debug, Clone)]
pub(crate) struct NodeData<N: QuadNum> {
    pub(crate) bounds: Rectangle<N>,
    pub(crate) points: Vec<Point<N>>,
    /// Index of the top-left child. All four children are allocated together and stored
    /// contiguously in quadrant order.
    pub(crate) first_child: Option<usize>,
    pub(crate) depth: usize,
}

impl<N: QuadNum> NodeData<N> {
    fn new(bounds: Rectangle<N>, depth: usize) -> Self {
        Self {
            bounds,
            points: vec![],
            first_child: None,
            depth,
        }
    }

    #[inline]
    pub(crate) fn children(&self) -> Option<[usize; 4]> {
        self.first_child
            .map(|first| [first, first + 1, first + 2, first + 3])
    }
}

/// A region quadtree over 2D points.
///
/// Each node holds up to `capacity` points directly. Inserting into a full node splits it into
/// four quadrants (once) and routes the point to the first child whose open region contains it.
/// Points already resident in a node stay there after it splits.
///
/// Nodes live in a flat arena owned by the tree; a split node refers to its children by index.
#[derive(Debug, Clone)]
pub struct Quadtree<N: QuadNum = f64> {
    nodes: Vec<NodeData<N>>,
    capacity: usize,
    max_depth: Option<usize>,
    len: usize,
}

impl<N: QuadNum> Quadtree<N> {
    /// Create an empty tree centered on `(x, y)` with the given half-extents and node capacity.
    ///
    /// Use [`QuadtreeBuilder`] for further options.
    pub fn new(x: N, y: N, half_width: N, half_height: N, capacity: usize) -> Result<Self> {
        QuadtreeBuilder::new(x, y, half_width, half_height)
            .capacity(capacity)
            .build()
    }

    pub(crate) fn from_parts(
        bounds: Rectangle<N>,
        capacity: usize,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            nodes: vec![NodeData::new(bounds, 0)],
            capacity,
            max_depth,
            len: 0,
        }
    }

    /// The bounds of the root node.
    pub fn bounds(&self) -> &Rectangle<N> {
        &self.nodes[ROOT].bounds
    }

    /// The number of points each node holds directly before splitting.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The depth at which nodes stop splitting, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the root node has been split into quadrants.
    pub fn is_split(&self) -> bool {
        self.nodes[ROOT].first_child.is_some()
    }

    /// The total number of nodes, including the root.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The depth of the deepest node. A tree that never split has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Access the root node for manual traversal.
    pub fn root(&self) -> Node<'_, N> {
        Node::new(self, ROOT)
    }

    #[inline]
    pub(crate) fn node_data(&self, id: usize) -> &NodeData<N> {
        &self.nodes[id]
    }

    /// Insert a point.
    ///
    /// Callers must only insert points strictly inside the root bounds. A point that a full
    /// node cannot route into any child fails with [`QuadtreeError::UnroutablePoint`]; this
    /// includes points lying exactly on a bisecting line of a split node. The failing node is
    /// left split.
    pub fn insert(&mut self, point: Point<N>) -> Result<()> {
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            let at_max_depth = self.max_depth.is_some_and(|max| node.depth >= max);
            if node.points.len() < self.capacity || at_max_depth {
                self.nodes[id].points.push(point);
                self.len += 1;
                return Ok(());
            }

            let children = match node.children() {
                Some(children) => children,
                None => self.divide(id),
            };
            id = children
                .into_iter()
                .find(|&child| self.nodes[child].bounds.contains(&point))
                .ok_or_else(|| QuadtreeError::UnroutablePoint {
                    x: point.x.to_f64().unwrap_or(f64::NAN),
                    y: point.y.to_f64().unwrap_or(f64::NAN),
                })?;
        }
    }

    /// Insert every point of `points` in order, stopping at the first failure.
    pub fn extend(&mut self, points: impl IntoIterator<Item = Point<N>>) -> Result<()> {
        for point in points {
            self.insert(point)?;
        }
        Ok(())
    }

    /// Split a leaf into four children and return their indices.
    fn divide(&mut self, id: usize) -> [usize; 4] {
        let first = self.nodes.len();
        let bounds = self.nodes[id].bounds;
        let depth = self.nodes[id].depth + 1;
        self.nodes
            .extend(Quadrant::ALL.map(|quadrant| NodeData::new(bounds.quadrant(quadrant), depth)));
        self.nodes[id].first_child = Some(first);
        trace!(node = id, depth, "split quadtree node");
        [first, first + 1, first + 2, first + 3]
    }

    /// Find all points that lie strictly inside `rect`.
    ///
    /// Each node contributes its own points in insertion order, followed by the results of its
    /// top-left, top-right, bottom-left and bottom-right subtrees. Subtrees whose bounds don't
    /// intersect `rect` are skipped.
    pub fn query(&self, rect: &Rectangle<N>) -> Vec<Point<N>> {
        let mut result = vec![];
        self.query_into(rect, &mut result);
        result
    }

    /// Like [`query`][Self::query], but appends the found points to `result`.
    pub fn query_into(&self, rect: &Rectangle<N>, result: &mut Vec<Point<N>>) {
        self.search(rect, result);
    }

    /// Collect the points inside `rect` and return the number of nodes whose bounds intersected
    /// it.
    pub(crate) fn search(&self, rect: &Rectangle<N>, result: &mut Vec<Point<N>>) -> usize {
        let mut visited = 0;
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
        stack.push(ROOT);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.bounds.intersects(rect) {
                continue;
            }
            visited += 1;

            result.extend(node.points.iter().filter(|p| rect.contains(p)));

            if let Some([top_left, top_right, bottom_left, bottom_right]) = node.children() {
                // Note: these are pushed in backwards order to what gets popped
                stack.push(bottom_right);
                stack.push(bottom_left);
                stack.push(top_right);
                stack.push(top_left);
            }
        }
        visited
    }

    /// Find all points that lie strictly inside a min/max box implementing [`RectTrait`].
    pub fn query_rect(&self, rect: &impl RectTrait<T = N>) -> Vec<Point<N>> {
        self.query(&Rectangle::from_rect(rect))
    }

    /// Remove every point and discard all children.
    ///
    /// The tree afterwards behaves as freshly constructed with the same bounds and capacity.
    pub fn clear(&mut self) {
        debug!(points = self.len, nodes = self.nodes.len(), "clear quadtree");
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT];
        root.points.clear();
        root.first_child = None;
        self.len = 0;
    }
}

impl<N: QuadNum> fmt::Display for Quadtree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root().fmt_tree(f)
    }
}
