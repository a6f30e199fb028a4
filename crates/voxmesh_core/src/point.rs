use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A point on the voxel lattice or in model space. `N` is a primitive array like `[i32; 3]`.
///
/// ```
/// use voxmesh_core::PointN;
///
/// let a = PointN([1, 2, 3]);
/// let b = PointN([3, 2, 1]);
///
/// assert_eq!(a + b, PointN([4, 4, 4]));
/// assert_eq!(a - b, PointN([-2, 0, 2]));
/// assert_eq!(a * 2, PointN([2, 4, 6]));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PointN<N>(pub N);

/// The number types points are made of.
pub trait Component:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn abs(self) -> Self;

    fn to_f32(self) -> f32;
}

impl Component for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline]
    fn abs(self) -> Self {
        i32::abs(self)
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Component for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

/// The operations shared by all points.
pub trait Point:
    Add<Output = Self>
    + Copy
    + Mul<<Self as Point>::Scalar, Output = Self>
    + Ones
    + Sized
    + SmallZero
    + Sub<Output = Self>
{
    type Scalar: Component;

    /// Component-wise absolute value.
    fn abs(&self) -> Self;

    /// The component on axis `component_index`, where X = 0, Y = 1, Z = 2.
    fn at(&self, component_index: usize) -> Self::Scalar;

    fn map_components(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;
}

/// Like `num::Zero`, but usable in constants.
pub trait SmallZero: Copy {
    const ZERO: Self;
}

pub trait Ones: Copy {
    /// A point of all ones.
    const ONES: Self;
}

pub trait DotProduct {
    type Scalar: Copy;

    fn dot(&self, other: &Self) -> Self::Scalar;
}

pub trait NormSquared {
    fn norm_squared(&self) -> f32;
}

pub trait Norm {
    fn norm(&self) -> f32;
}

impl<T> Norm for T
where
    T: NormSquared,
{
    fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }
}

/// Lattice points, which bound the extents of voxel arrays.
pub trait IntegerPoint: Point {
    /// Component-wise maximum.
    fn join(&self, other: &Self) -> Self;

    /// Component-wise minimum.
    fn meet(&self, other: &Self) -> Self;

    /// The product of all components, or `None` if it overflows. Only meaningful for shapes.
    fn volume(&self) -> Option<Self::Scalar>;

    /// Returns `true` iff every component of `self` is `>=` the matching component of `other`.
    fn all_ge(&self, other: &Self) -> bool;

    /// Returns `true` iff every component of `self` is `<` the matching component of `other`.
    fn all_lt(&self, other: &Self) -> bool;
}

impl<T, const N: usize> PointN<[T; N]>
where
    T: Component,
{
    #[inline]
    fn zip_map(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(other.0.iter()) {
            *a = f(*a, *b);
        }

        out
    }

    #[inline]
    fn all_pairs(&self, other: &Self, f: impl Fn(T, T) -> bool) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| f(*a, *b))
    }

    /// Component-wise minimum.
    pub fn min_components(&self, other: &Self) -> Self {
        self.zip_map(*other, |a, b| if b < a { b } else { a })
    }

    /// Component-wise maximum.
    pub fn max_components(&self, other: &Self) -> Self {
        self.zip_map(*other, |a, b| if b > a { b } else { a })
    }
}

impl<T, const N: usize> Point for PointN<[T; N]>
where
    T: Component,
{
    type Scalar = T;

    #[inline]
    fn abs(&self) -> Self {
        self.map_components(T::abs)
    }

    #[inline]
    fn at(&self, component_index: usize) -> T {
        self.0[component_index]
    }

    #[inline]
    fn map_components(&self, f: impl Fn(T) -> T) -> Self {
        let mut out = *self;
        for c in out.0.iter_mut() {
            *c = f(*c);
        }

        out
    }
}

impl<T, const N: usize> SmallZero for PointN<[T; N]>
where
    T: Component,
{
    const ZERO: Self = PointN([T::ZERO; N]);
}

impl<T, const N: usize> Ones for PointN<[T; N]>
where
    T: Component,
{
    const ONES: Self = PointN([T::ONE; N]);
}

impl<T, const N: usize> DotProduct for PointN<[T; N]>
where
    T: Component,
{
    type Scalar = T;

    fn dot(&self, other: &Self) -> T {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(T::ZERO, |sum, (a, b)| sum + *a * *b)
    }
}

impl<T, const N: usize> NormSquared for PointN<[T; N]>
where
    T: Component,
{
    fn norm_squared(&self) -> f32 {
        self.dot(self).to_f32()
    }
}

impl<const N: usize> IntegerPoint for PointN<[i32; N]> {
    fn join(&self, other: &Self) -> Self {
        self.max_components(other)
    }

    fn meet(&self, other: &Self) -> Self {
        self.min_components(other)
    }

    fn volume(&self) -> Option<i32> {
        self.0.iter().try_fold(1i32, |acc, &c| acc.checked_mul(c))
    }

    fn all_ge(&self, other: &Self) -> bool {
        self.all_pairs(other, |a, b| a >= b)
    }

    fn all_lt(&self, other: &Self) -> bool {
        self.all_pairs(other, |a, b| a < b)
    }
}

impl<T, const N: usize> Add for PointN<[T; N]>
where
    T: Component,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<T, const N: usize> Sub for PointN<[T; N]>
where
    T: Component,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl<T, const N: usize> Mul<T> for PointN<[T; N]>
where
    T: Component,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.map_components(|c| c * rhs)
    }
}

impl<T, const N: usize> Neg for PointN<[T; N]>
where
    T: Component,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map_components(|c| -c)
    }
}

impl<T, const N: usize> AddAssign for PointN<[T; N]>
where
    T: Component,
{
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T, const N: usize> SubAssign for PointN<[T; N]>
where
    T: Component,
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integer_lattice_ops() {
        let a = PointN([1, -2, 3]);
        let b = PointN([0, 4, 3]);

        assert_eq!(a.join(&b), PointN([1, 4, 3]));
        assert_eq!(a.meet(&b), PointN([0, -2, 3]));
        assert_eq!(a.abs().volume(), Some(6));
        assert_eq!(PointN([65536, 65536, 1]).volume(), None);
        assert!(a.join(&b).all_ge(&a));
        assert!(!a.all_lt(&b));
        assert_eq!(a.dot(&b), -8 + 9);
    }

    #[test]
    fn float_bounds() {
        let a = PointN([-3.5, 1.0]);
        let b = PointN([2.0, -1.0]);

        assert_eq!(a.min_components(&b), PointN([-3.5, -1.0]));
        assert_eq!(a.max_components(&b), PointN([2.0, 1.0]));
        assert_eq!(b.norm(), 5.0f32.sqrt());
    }

    #[test]
    fn negation() {
        assert_eq!(-PointN([1, -2, 3]), PointN([-1, 2, -3]));
        assert_eq!(-PointN([0.5, 0.0]), PointN([-0.5, -0.0]));
    }
}
