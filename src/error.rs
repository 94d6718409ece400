use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadtreeError {
    /// A full node could not route the point into any of its four children.
    ///
    /// Child regions are open, so a point lying exactly on a bisecting line of a split node (or
    /// outside the root bounds) has nowhere to go.
    #[error("Insert could not find a subtree for point ({x}, {y})")]
    UnroutablePoint { x: f64, y: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, QuadtreeError>;
