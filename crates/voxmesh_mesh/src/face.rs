use voxmesh_core::{axis::Axis3Permutation, prelude::*};

/// Metadata that's used to aid in the geometric calculations for one of the 6 possible cube faces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OrientedCubeFace {
    /// Determines the orientation of the plane.
    pub n_sign: i32,

    /// Determines the {N, U, V} <--> {X, Y, Z} relation.
    pub permutation: Axis3Permutation,

    /// First in the `permutation` of +X, +Y, and +Z.
    pub n: Point3i,
    /// Second in the `permutation` of +X, +Y, and +Z.
    pub u: Point3i,
    /// Third in the `permutation` of +X, +Y, and +Z.
    pub v: Point3i,
}

/// The six faces in extraction order: all negative faces, then all positive faces, each in X, Y, Z order.
pub const CUBE_FACES: [OrientedCubeFace; 6] = [
    OrientedCubeFace::new_const(-1, Axis3Permutation::XZY),
    OrientedCubeFace::new_const(-1, Axis3Permutation::YXZ),
    OrientedCubeFace::new_const(-1, Axis3Permutation::ZXY),
    OrientedCubeFace::new_const(1, Axis3Permutation::XZY),
    OrientedCubeFace::new_const(1, Axis3Permutation::YXZ),
    OrientedCubeFace::new_const(1, Axis3Permutation::ZXY),
];

impl OrientedCubeFace {
    const fn new_const(n_sign: i32, permutation: Axis3Permutation) -> Self {
        let [n, u, v] = match permutation {
            Axis3Permutation::XZY => [[1, 0, 0], [0, 0, 1], [0, 1, 0]],
            Axis3Permutation::YXZ => [[0, 1, 0], [1, 0, 0], [0, 0, 1]],
            Axis3Permutation::ZXY => [[0, 0, 1], [1, 0, 0], [0, 1, 0]],
            Axis3Permutation::XYZ => [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
            Axis3Permutation::YZX => [[0, 1, 0], [0, 0, 1], [1, 0, 0]],
            Axis3Permutation::ZYX => [[0, 0, 1], [0, 1, 0], [1, 0, 0]],
        };

        Self {
            n_sign,
            permutation,
            n: PointN(n),
            u: PointN(u),
            v: PointN(v),
        }
    }

    pub fn new(n_sign: i32, permutation: Axis3Permutation) -> Self {
        Self::new_const(n_sign, permutation)
    }

    pub fn signed_normal(&self) -> Point3i {
        self.n * self.n_sign
    }

    pub fn mesh_normal(&self) -> Point3f {
        self.signed_normal().into()
    }

    /// Whether the U axis must run backwards for the face texture to read unmirrored from outside the model. True for +X,
    /// +Y and -Z.
    pub fn flips_u(&self) -> bool {
        self.u.cross(&self.v).dot(&self.signed_normal()) < 0
    }

    /// Texture rows run top to bottom while V runs upward, so V is always reversed.
    pub fn flips_v(&self) -> bool {
        true
    }
}

/// Where a `FaceRect` landed in its atlas: the minimum corner of its bordered tile.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AtlasPlacement {
    pub x: u32,
    pub y: u32,
}

/// One merged, axis-aligned quad produced by greedy surface extraction.
///
/// The quad covers `[u_min, u_max) x [v_min, v_max)` in the face's (U, V) plane, at `plane` along its normal axis. For
/// positive faces, `plane` is one past the voxel layer, so the quad sits on the voxel boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceRect {
    pub face: OrientedCubeFace,
    pub u_min: i32,
    pub u_max: i32,
    pub v_min: i32,
    pub v_max: i32,
    pub plane: i32,
    /// Only set when faces were merged per color.
    pub color: Option<u8>,
    /// Unset until the rectangle has been packed into an atlas.
    pub placement: Option<AtlasPlacement>,
    /// Which model grid the face was extracted from.
    pub model_index: u32,
}

impl FaceRect {
    pub fn width(&self) -> i32 {
        self.u_max - self.u_min
    }

    pub fn height(&self) -> i32 {
        self.v_max - self.v_min
    }

    /// The face's area in voxel faces.
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    fn point(&self, u: i32, v: i32) -> Point3i {
        self.face.n * self.plane + self.face.u * u + self.face.v * v
    }

    /// Returns the 4 corners of the quad in this order:
    ///
    /// ```text
    ///         3 <---- 2
    ///                 ^
    ///     ^           |
    ///     |           |
    ///  +v |   0 ----> 1
    ///     |
    ///      -------->
    ///        +u
    /// ```
    pub fn corners(&self) -> [Point3i; 4] {
        [
            self.point(self.u_min, self.v_min),
            self.point(self.u_max, self.v_min),
            self.point(self.u_max, self.v_max),
            self.point(self.u_min, self.v_max),
        ]
    }

    /// The (U, V) lattice coordinates of each corner, in the same order as `corners`.
    pub fn corner_uvs(&self) -> [[i32; 2]; 4] {
        [
            [self.u_min, self.v_min],
            [self.u_max, self.v_min],
            [self.u_max, self.v_max],
            [self.u_min, self.v_max],
        ]
    }

    /// The voxel whose color shows at texel `(ix, iy)` of this face's tile interior.
    pub fn texel_voxel(&self, ix: i32, iy: i32) -> Point3i {
        let u = if self.face.flips_u() {
            self.u_max - 1 - ix
        } else {
            self.u_min + ix
        };
        let v = if self.face.flips_v() {
            self.v_max - 1 - iy
        } else {
            self.v_min + iy
        };
        let layer = if self.face.n_sign > 0 {
            self.plane - 1
        } else {
            self.plane
        };

        self.face.n * layer + self.face.u * u + self.face.v * v
    }

    /// The atlas pixel coordinate of a (U, V) lattice corner, given the tile placement. Tiles carry a 1-pixel border.
    pub fn atlas_pixel(&self, placement: AtlasPlacement, [u, v]: [i32; 2]) -> [u32; 2] {
        let du = if self.face.flips_u() {
            self.u_max - u
        } else {
            u - self.u_min
        };
        let dv = if self.face.flips_v() {
            self.v_max - v
        } else {
            v - self.v_min
        };

        [
            placement.x + 1 + du as u32,
            placement.y + 1 + dv as u32,
        ]
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
