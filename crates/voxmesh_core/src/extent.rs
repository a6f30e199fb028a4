use crate::{IntegerPoint, Ones, PointN, SmallZero};

/// An axis-aligned box of lattice points: the product of a half-open interval `[minimum, minimum + shape)` on each axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

/// The bounds of an atlas image.
pub type Extent2i = ExtentN<[i32; 2]>;
/// The bounds of a voxel model.
pub type Extent3i = ExtentN<[i32; 3]>;

impl<N> ExtentN<N> {
    #[inline]
    pub fn from_min_and_shape(minimum: PointN<N>, shape: PointN<N>) -> Self {
        Self { minimum, shape }
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: IntegerPoint<Scalar = i32>,
{
    /// The extent of all `p` with `minimum <= p < least_upper_bound`. Empty if any component of the bound is not
    /// greater than the minimum.
    #[inline]
    pub fn from_min_and_lub(minimum: PointN<N>, least_upper_bound: PointN<N>) -> Self {
        let shape = (least_upper_bound - minimum).join(&PointN::ZERO);

        Self { minimum, shape }
    }

    #[inline]
    pub fn least_upper_bound(&self) -> PointN<N> {
        self.minimum + self.shape
    }

    /// The greatest point in a non-empty extent.
    #[inline]
    pub fn max(&self) -> PointN<N> {
        self.least_upper_bound() - PointN::ONES
    }

    #[inline]
    pub fn contains(&self, p: PointN<N>) -> bool {
        p.all_ge(&self.minimum) && p.all_lt(&self.least_upper_bound())
    }

    /// The number of points, or `None` if it doesn't fit in the `i32` lattice.
    #[inline]
    pub fn checked_num_points(&self) -> Option<usize> {
        self.shape.volume().map(|v| v.max(0) as usize)
    }

    /// The number of points. An extent too large to index is treated as empty.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.checked_num_points().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_min_and_lub(
            self.minimum.join(&other.minimum),
            self.least_upper_bound().meet(&other.least_upper_bound()),
        )
    }

    /// The bounding box of `self` and `other`. An empty extent contributes nothing.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => Self::from_min_and_shape(other.minimum, other.shape),
            (_, true) => Self::from_min_and_shape(self.minimum, self.shape),
            _ => Self::from_min_and_lub(
                self.minimum.meet(&other.minimum),
                self.least_upper_bound().join(&other.least_upper_bound()),
            ),
        }
    }
}

/// Extents whose points can be enumerated.
pub trait IntegerExtent<N> {
    type PointIter: Iterator<Item = PointN<N>>;

    /// All points of the extent in row-major order, X varying fastest.
    fn iter_points(&self) -> Self::PointIter;
}

/// Row-major iterator over the points of an `ExtentN<[i32; D]>`.
#[derive(Clone, Debug)]
pub struct ExtentPoints<const D: usize> {
    minimum: [i32; D],
    lub: [i32; D],
    next: Option<[i32; D]>,
}

impl<const D: usize> Iterator for ExtentPoints<D> {
    type Item = PointN<[i32; D]>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        // Odometer increment: carry into the next axis when one wraps.
        let mut p = current;
        self.next = None;
        for axis in 0..D {
            p[axis] += 1;
            if p[axis] < self.lub[axis] {
                self.next = Some(p);
                break;
            }
            p[axis] = self.minimum[axis];
        }

        Some(PointN(current))
    }
}

impl<const D: usize> IntegerExtent<[i32; D]> for ExtentN<[i32; D]> {
    type PointIter = ExtentPoints<D>;

    #[inline]
    fn iter_points(&self) -> Self::PointIter {
        let lub = self.least_upper_bound();

        ExtentPoints {
            minimum: self.minimum.0,
            lub: lub.0,
            next: (!self.is_empty()).then(|| self.minimum.0),
        }
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
    fn empty_intersection_is_empty() {
        let e1 = Extent2i::from_min_and_lub(PointN([0; 2]), PointN([2; 2]));
        let e2 = Extent2i::from_min_and_lub(PointN([3; 2]), PointN([5; 2]));

        let i = e1.intersection(&e2);

        assert_eq!(i.shape, PointN([0; 2]));
        assert!(i.is_empty());
        assert_eq!(i.iter_points().count(), 0);
    }

    #[test]
    fn union_covers_both() {
        let e1 = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([1, 1, 1]));
        let e2 = Extent3i::from_min_and_shape(PointN([-2, 3, 1]), PointN([1, 1, 1]));
        let empty = Extent3i::from_min_and_shape(PointN([50, 50, 50]), PointN([0, 4, 4]));

        let u = e1.union(&e2);

        assert_eq!(u.minimum, PointN([-2, 0, 0]));
        assert_eq!(u.least_upper_bound(), PointN([1, 4, 2]));
        assert_eq!(u.max(), PointN([0, 3, 1]));
        assert_eq!(u.union(&empty), u);
        assert_eq!(empty.union(&u), u);
    }

    #[test]
    fn contains_is_half_open() {
        let e = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([2, 3, 4]));

        assert_eq!(e.num_points(), 24);
        assert!(e.contains(PointN([1, 2, 3])));
        assert!(!e.contains(PointN([2, 0, 0])));
        assert!(!e.contains(PointN([0, -1, 0])));
    }

    #[test]
    fn overflowing_volume_is_not_indexable() {
        let e = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([65536, 65536, 1]));

        assert_eq!(e.checked_num_points(), None);
        assert_eq!(e.num_points(), 0);
        assert!(e.is_empty());
    }

    #[test]
    fn points_are_row_major() {
        let square = Extent2i::from_min_and_shape(PointN([5, -1]), PointN([2, 2]));
        assert_eq!(
            square.iter_points().collect::<Vec<_>>(),
            vec![
                PointN([5, -1]),
                PointN([6, -1]),
                PointN([5, 0]),
                PointN([6, 0]),
            ]
        );

        let cube = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([2, 1, 2]));
        assert_eq!(
            cube.iter_points().collect::<Vec<_>>(),
            vec![
                PointN([0, 0, 0]),
                PointN([1, 0, 0]),
                PointN([0, 0, 1]),
                PointN([1, 0, 1]),
            ]
        );
    }
}
