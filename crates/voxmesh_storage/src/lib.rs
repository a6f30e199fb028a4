#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Dense storage for voxels and pixels in 2 or 3 dimensions.
//!
//! The core storage type is `ArrayN`, an N-dimensional array backed by a single flat `Vec`. Points are translated into a
//! `Stride` (a flat offset) by the array, which is also where bounds are checked.

pub mod array;

pub use array::*;

/// Used in many generic algorithms to check if a voxel is considered empty.
pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl IsEmpty for bool {
    fn is_empty(&self) -> bool {
        !*self
    }
}

impl<T> IsEmpty for Option<T> {
    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

/// A voxel that carries a material (for example a palette color) which adjacent faces must share to be merged.
pub trait MaterialVoxel {
    type Material: Copy + Eq;

    fn material(&self) -> Self::Material;
}

// Hash types to use for small keys like `PointN`.
pub type SmallKeyHashMap<K, V> = ahash::AHashMap<K, V>;
pub type SmallKeyHashSet<K> = ahash::AHashSet<K>;

pub mod prelude {
    pub use super::{
        Array2, Array3, ArrayN, IsEmpty, Local, Local2i, Local3i, SmallKeyHashMap,
        MaterialVoxel, SmallKeyHashSet, Stride,
    };
}
