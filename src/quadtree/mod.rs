//! A region quadtree over 2D points with a fixed capacity per node.

#![warn(missing_docs)]

mod builder;
mod index;
mod traversal;

pub use builder::{QuadtreeBuilder, DEFAULT_CAPACITY};
pub use index::Quadtree;
pub use traversal::Node;
