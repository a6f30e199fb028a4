use crate::PointN;

pub type Point2<T> = PointN<[T; 2]>;
/// Texel coordinates in an atlas, among other things.
pub type Point2i = PointN<[i32; 2]>;

impl<T> Point2<T>
where
    T: Copy,
{
    pub fn x(&self) -> T {
        self.0[0]
    }

    pub fn y(&self) -> T {
        self.0[1]
    }
}
