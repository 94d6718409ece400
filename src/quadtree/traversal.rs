//! Utilities to traverse the Quadtree structure.

use std::fmt;

use tinyvec::TinyVec;

use crate::point::Point;
use crate::quadtree::Quadtree;
use crate::r#type::QuadNum;
use crate::rectangle::{Quadrant, Rectangle};

/// A borrowed view onto one node of a [`Quadtree`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, N: QuadNum> {
    /// The tree that this node is a reference onto
    tree: &'a Quadtree<N>,

    /// Index of this node in the tree's node arena
    id: usize,
}

impl<'a, N: QuadNum> Node<'a, N> {
    pub(crate) fn new(tree: &'a Quadtree<N>, id: usize) -> Self {
        Self { tree, id }
    }

    /// The bounds covered by this node.
    pub fn bounds(&self) -> &'a Rectangle<N> {
        &self.tree.node_data(self.id).bounds
    }

    /// The points stored directly in this node, in insertion order.
    pub fn points(&self) -> &'a [Point<N>] {
        &self.tree.node_data(self.id).points
    }

    /// The depth of this node. The root is at depth 0.
    pub fn depth(&self) -> usize {
        self.tree.node_data(self.id).depth
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tree.node_data(self.id).first_child.is_none()
    }

    /// The four children of this node in [`Quadrant::ALL`] order, or `None` for a leaf.
    pub fn children(&self) -> Option<[Node<'a, N>; 4]> {
        self.tree
            .node_data(self.id)
            .children()
            .map(|ids| ids.map(|id| Node::new(self.tree, id)))
    }

    /// The child covering `quadrant`, or `None` for a leaf.
    pub fn child(&self, quadrant: Quadrant) -> Option<Node<'a, N>> {
        self.children().map(|children| children[quadrant as usize])
    }

    /// The number of points stored in this node and all of its descendants.
    pub fn num_points(&self) -> usize {
        let mut count = 0;
        let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
        stack.push(self.id);
        while let Some(id) = stack.pop() {
            let node = self.tree.node_data(id);
            count += node.points.len();
            if let Some(children) = node.children() {
                stack.extend(children);
            }
        }
        count
    }

    /// Write an indented dump of this subtree, one line per node.
    ///
    /// Each line holds the node's bounds followed by the points stored directly in it. Children
    /// follow their parent in [`Quadrant::ALL`] order, indented by two more spaces.
    pub fn fmt_tree(&self, out: &mut impl fmt::Write) -> fmt::Result {
        self.walk(out, |out, node| {
            write!(out, "{} ", node.bounds())?;
            write_points(out, node.points())
        })
    }

    /// Like [`fmt_tree`][Self::fmt_tree], but each line only holds the node's points.
    pub fn fmt_tree_short(&self, out: &mut impl fmt::Write) -> fmt::Result {
        self.walk(out, |out, node| {
            out.write_char('|')?;
            write_points(out, node.points())
        })
    }

    fn walk<W: fmt::Write>(
        &self,
        out: &mut W,
        line: impl Fn(&mut W, &Node<'a, N>) -> fmt::Result,
    ) -> fmt::Result {
        let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
        stack.push(self.id);
        while let Some(id) = stack.pop() {
            let node = Node::new(self.tree, id);
            for _ in self.depth()..node.depth() {
                out.write_str("  ")?;
            }
            line(&mut *out, &node)?;
            out.write_char('\n')?;

            if let Some(children) = self.tree.node_data(id).children() {
                // Note: these are pushed in backwards order to what gets popped
                stack.extend(children.into_iter().rev());
            }
        }
        Ok(())
    }
}

fn write_points<N: QuadNum>(out: &mut impl fmt::Write, points: &[Point<N>]) -> fmt::Result {
    out.write_char('[')?;
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{}", point)?;
    }
    out.write_char(']')
}

impl<N: QuadNum> fmt::Display for Node<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f)
    }
}
