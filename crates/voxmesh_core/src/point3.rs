use crate::{Component, NormSquared, PointN};

pub type Point3<T> = PointN<[T; 3]>;
/// A voxel on the lattice.
pub type Point3i = PointN<[i32; 3]>;
/// A position or direction in model space.
pub type Point3f = PointN<[f32; 3]>;

impl<T> Point3<T>
where
    T: Copy,
{
    pub fn fill(value: T) -> Self {
        PointN([value; 3])
    }

    pub fn x(&self) -> T {
        self.0[0]
    }

    pub fn y(&self) -> T {
        self.0[1]
    }

    pub fn z(&self) -> T {
        self.0[2]
    }

    pub fn x_mut(&mut self) -> &mut T {
        &mut self.0[0]
    }

    /// Swaps Y and Z, converting between Z-up and Y-up. This also flips handedness.
    pub fn xzy(&self) -> Self {
        let [x, y, z] = self.0;

        PointN([x, z, y])
    }
}

impl<T> Point3<T>
where
    T: Component,
{
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;

        PointN([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl Point3f {
    /// The unit vector in the same direction, or `None` for a (nearly) zero vector.
    pub fn normalized(&self) -> Option<Self> {
        let norm_sq = self.norm_squared();
        if norm_sq <= f32::EPSILON * f32::EPSILON {
            return None;
        }

        Some(*self * norm_sq.sqrt().recip())
    }
}

impl From<Point3i> for Point3f {
    fn from(p: Point3i) -> Self {
        let [x, y, z] = p.0;

        PointN([x as f32, y as f32, z as f32])
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
