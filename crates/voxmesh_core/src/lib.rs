#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! The core data types for voxel meshing:
//! - `PointN`: an N-dimensional point, most importantly `Point2i`, `Point3i` and `Point3f`
//! - `ExtentN`: an N-dimensional extent, most importantly `Extent2i` and `Extent3i`
//! - `Rotation3` and `Transform3`: the signed-permutation transforms used by scene graphs of voxel models

pub mod axis;
pub mod extent;
pub mod int_math;
pub mod point;
pub mod point2;
pub mod point3;
pub mod rotation;

pub use axis::{Axis3, Axis3Permutation};
pub use extent::{Extent2i, Extent3i, ExtentN, ExtentPoints, IntegerExtent};
pub use point::{
    Component, DotProduct, IntegerPoint, Norm, NormSquared, Ones, Point, PointN, SmallZero,
};
pub use point2::{Point2, Point2i};
pub use point3::{Point3, Point3f, Point3i};
pub use rotation::{Rotation3, Transform3};

pub mod prelude {
    pub use super::{
        DotProduct, Extent2i, Extent3i, ExtentN, IntegerExtent, IntegerPoint, Norm, NormSquared,
        Ones, Point, Point2, Point2i, Point3, Point3f, Point3i, PointN, Rotation3,
        SmallZero, Transform3,
    };
}
