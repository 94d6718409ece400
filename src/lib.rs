#![doc = include_str!("../README.md")]

mod error;
mod point;
pub mod proximity;
pub mod quadtree;
mod rectangle;
pub mod rounds;
mod r#type;

pub use error::{QuadtreeError, Result};
pub use point::Point;
pub use quadtree::{Quadtree, QuadtreeBuilder};
pub use r#type::QuadNum;
pub use rectangle::{Quadrant, Rectangle};
