use crate::{Point3i, PointN};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis3 {
    /// The index of this axis' component in a point.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn unit_vector(&self) -> Point3i {
        let mut v = [0; 3];
        v[self.index()] = 1;

        PointN(v)
    }
}

/// An ordering of the three axes, read as a (normal, U, V) frame for one pair of cube faces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis3Permutation {
    XYZ,
    ZXY,
    YZX,
    ZYX,
    XZY,
    YXZ,
}

impl Axis3Permutation {
    pub fn axes(&self) -> [Axis3; 3] {
        use Axis3::*;

        match self {
            Axis3Permutation::XYZ => [X, Y, Z],
            Axis3Permutation::ZXY => [Z, X, Y],
            Axis3Permutation::YZX => [Y, Z, X],
            Axis3Permutation::ZYX => [Z, Y, X],
            Axis3Permutation::XZY => [X, Z, Y],
            Axis3Permutation::YXZ => [Y, X, Z],
        }
    }

    /// `1` for the cyclic orderings, whose (normal, U, V) frame is right-handed, and `-1` for the others.
    pub fn sign(&self) -> i32 {
        let [n, u, _] = self.axes();
        if (n.index() + 1) % 3 == u.index() {
            1
        } else {
            -1
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
