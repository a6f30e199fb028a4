use voxmesh_core::PointN;

use core::ops::{Add, AddAssign, Mul, Sub};

/// A point relative to an array's minimum, as opposed to the global points arrays are normally indexed with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Local<N>(pub PointN<N>);

pub type Local2i = Local<[i32; 2]>;
pub type Local3i = Local<[i32; 3]>;

/// An offset into an array's flat storage.
///
/// Offsets of negative unit steps wrap around, so `s + step` and `s - step` both land on a neighbor as long as the
/// result is in bounds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stride(pub usize);

impl Add for Stride {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Stride(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Stride {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Stride(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul<usize> for Stride {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: usize) -> Self {
        Stride(self.0.wrapping_mul(rhs))
    }
}

impl AddAssign for Stride {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}
