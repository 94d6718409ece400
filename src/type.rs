use std::fmt::{Debug, Display};

use num_traits::Float;

/// A trait for types that can be used as quadtree coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Subdivision halves extents
/// on every split, which is only meaningful for floating point coordinates.
pub trait QuadNum: private::Sealed + Float + Debug + Display + Send + Sync + 'static {
    /// Two, used for halving extents.
    const TWO: Self;
}

impl QuadNum for f32 {
    const TWO: Self = 2.0;
}

impl QuadNum for f64 {
    const TWO: Self = 2.0;
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
