//! N-dimensional arrays, where N is 2 or 3.
//!
//! The domains of all arrays are located within an ambient space, a signed integer lattice where the elements are `Point2i` or
//! `Point3i`. This means they contain data at exactly the set of points in an `ExtentN`, and no more.
//!
//! # Indexing
//!
//! You can index an array with 3 kinds of coordinates:
//!   - `Stride`: flat array offset
//!   - `Local`: N-dimensional point in extent-local coordinates (i.e. min = `[0, 0, 0]`)
//!   - `PointN`: N-dimensional point in global (ambient) coordinates
//!
//! `get` and `get_mut` check bounds and return `None` outside of the extent, while `Index` panics.
//!
//! ```
//! use voxmesh_core::prelude::*;
//! use voxmesh_storage::prelude::*;
//!
//! let array_extent = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(16));
//! let mut array = Array3::fill(array_extent, 0);
//!
//! // Write all points in the extent to the same value.
//! let write_extent = Extent3i::from_min_and_lub(Point3i::fill(4), Point3i::fill(8));
//! array.fill_extent(&write_extent, 1);
//!
//! // Only the points in the extent should have been written.
//! array.for_each(array.extent(), |p, &value| {
//!     if write_extent.contains(p) {
//!         assert_eq!(value, 1);
//!     } else {
//!         assert_eq!(value, 0);
//!     }
//! });
//! assert_eq!(array.get(PointN([-1, 0, 0])), None);
//! ```
//!
//! # Strides
//!
//! Since `Stride` lookups are fast and linear, they are ideal for kernel-based algorithms (like boundary detection). Convert
//! a unit offset into a `Stride` once and then add it to the stride of any interior point to reach its neighbor.

mod coords;
mod indexer;

#[cfg(feature = "image")]
mod image_conversions;

pub use coords::*;
pub use indexer::*;

use voxmesh_core::prelude::*;

use core::ops::{Index, IndexMut};

/// A map from lattice location `PointN<N>` to data `T`, stored as a flat array.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArrayN<N, T> {
    values: Vec<T>,
    extent: ExtentN<N>,
}

/// A 2-dimensional `ArrayN`.
pub type Array2<T> = ArrayN<[i32; 2], T>;
/// A 3-dimensional `ArrayN`.
pub type Array3<T> = ArrayN<[i32; 3], T>;

impl<N, T> ArrayN<N, T> {
    /// The extent of the array.
    #[inline]
    pub fn extent(&self) -> &ExtentN<N> {
        &self.extent
    }

    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values
    }
}

impl<N, T> ArrayN<N, T>
where
    N: ArrayIndexer<N>,
    PointN<N>: IntegerPoint<Scalar = i32>,
    ExtentN<N>: IntegerExtent<N>,
{
    /// Create a new `ArrayN` directly from the extent and values. Returns `None` if the number of values does not match the
    /// number of points in `extent`.
    pub fn new(extent: ExtentN<N>, values: Vec<T>) -> Option<Self> {
        let extent = indexable(extent);
        if values.len() != extent.num_points() {
            return None;
        }

        Some(Self { values, extent })
    }

    /// Creates an array with every point set to `value`.
    pub fn fill(extent: ExtentN<N>, value: T) -> Self
    where
        T: Clone,
    {
        let extent = indexable(extent);

        Self {
            values: vec![value; extent.num_points()],
            extent,
        }
    }

    /// Creates an array by evaluating `filler` at every point, in row-major order.
    pub fn fill_with(extent: ExtentN<N>, filler: impl FnMut(PointN<N>) -> T) -> Self {
        let extent = indexable(extent);

        Self {
            values: extent.iter_points().map(filler).collect(),
            extent,
        }
    }

    /// Translates a local point into a flat offset. Does not check bounds.
    #[inline]
    pub fn stride_from_local_point(&self, p: Local<N>) -> Stride {
        N::stride_from_local_point(self.extent.shape, p)
    }

    /// Translates a global point into a flat offset, or `None` if the point is outside of the array.
    #[inline]
    pub fn stride_from_point(&self, p: PointN<N>) -> Option<Stride> {
        if !self.extent.contains(p) {
            return None;
        }

        Some(self.stride_from_local_point(Local(p - self.extent.minimum)))
    }

    #[inline]
    pub fn get(&self, p: PointN<N>) -> Option<&T> {
        self.stride_from_point(p).map(|s| &self.values[s.0])
    }

    #[inline]
    pub fn get_mut(&mut self, p: PointN<N>) -> Option<&mut T> {
        match self.stride_from_point(p) {
            Some(s) => Some(&mut self.values[s.0]),
            None => None,
        }
    }

    /// Sets every point in `extent` (intersected with the array's extent) to `value`.
    pub fn fill_extent(&mut self, extent: &ExtentN<N>, value: T)
    where
        T: Clone,
    {
        let in_bounds = extent.intersection(&self.extent);
        for p in in_bounds.iter_points() {
            let stride = self.stride_from_local_point(Local(p - self.extent.minimum));
            self.values[stride.0] = value.clone();
        }
    }

    /// Calls `f` on every point in `extent` (intersected with the array's extent), in row-major order.
    pub fn for_each(&self, extent: &ExtentN<N>, mut f: impl FnMut(PointN<N>, &T)) {
        let in_bounds = extent.intersection(&self.extent);
        for p in in_bounds.iter_points() {
            let stride = self.stride_from_local_point(Local(p - self.extent.minimum));
            f(p, &self.values[stride.0]);
        }
    }

    /// Creates a new array with the same extent by transforming every value.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> ArrayN<N, U>
    where
        ExtentN<N>: Copy,
    {
        ArrayN {
            values: self.values.iter().map(f).collect(),
            extent: self.extent,
        }
    }
}

/// An extent whose point count overflows the lattice can't be strided, so it collapses to an empty extent at the same
/// minimum.
fn indexable<N>(extent: ExtentN<N>) -> ExtentN<N>
where
    PointN<N>: IntegerPoint<Scalar = i32>,
{
    if extent.checked_num_points().is_some() {
        return extent;
    }

    ExtentN::from_min_and_shape(extent.minimum, PointN::ZERO)
}

impl<N, T> Index<Stride> for ArrayN<N, T> {
    type Output = T;

    #[inline]
    fn index(&self, stride: Stride) -> &Self::Output {
        &self.values[stride.0]
    }
}

impl<N, T> IndexMut<Stride> for ArrayN<N, T> {
    #[inline]
    fn index_mut(&mut self, stride: Stride) -> &mut Self::Output {
        &mut self.values[stride.0]
    }
}

impl<N, T> Index<PointN<N>> for ArrayN<N, T>
where
    N: ArrayIndexer<N>,
    PointN<N>: IntegerPoint<Scalar = i32> + core::fmt::Debug,
    ExtentN<N>: IntegerExtent<N>,
{
    type Output = T;

    #[inline]
    fn index(&self, p: PointN<N>) -> &Self::Output {
        match self.get(p) {
            Some(v) => v,
            None => panic!("point {:?} is out of array bounds", p),
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
