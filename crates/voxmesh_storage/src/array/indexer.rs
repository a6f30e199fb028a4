use crate::{Local, Stride};

use voxmesh_core::PointN;

/// Translates array-local points into flat offsets. X is the fastest-varying component.
pub trait ArrayIndexer<N> {
    fn stride_from_local_point(shape: PointN<N>, point: Local<N>) -> Stride;
}

impl<const D: usize> ArrayIndexer<[i32; D]> for [i32; D] {
    #[inline]
    fn stride_from_local_point(shape: PointN<[i32; D]>, point: Local<[i32; D]>) -> Stride {
        let Local(PointN(p)) = point;
        let offset = (0..D).rev().fold(0, |acc, axis| acc * shape.0[axis] + p[axis]);

        Stride(offset as usize)
    }
}
