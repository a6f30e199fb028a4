use crate::{Point3f, Point3i, PointN, SmallZero};

use core::ops::Mul;

/// A 3x3 rotation matrix whose rows are signed standard basis vectors, i.e. a signed permutation matrix.
///
/// These are exactly the 48 orientations a voxel model can take without resampling. Proper rotations have determinant
/// +1; the rest also mirror the model.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rotation3 {
    /// Row-major entries, each in {-1, 0, 1}.
    pub rows: [[i8; 3]; 3],
}

impl Default for Rotation3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation3 {
    pub const IDENTITY: Self = Self {
        rows: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    };

    /// Decodes the packed rotation byte used by MagicaVoxel transform frames.
    ///
    /// ```text
    /// bit | meaning
    /// 0-1 | column of the non-zero entry in row 0
    /// 2-3 | column of the non-zero entry in row 1
    /// 4   | sign of row 0 (0 : positive; 1 : negative)
    /// 5   | sign of row 1
    /// 6   | sign of row 2
    /// ```
    ///
    /// Row 2 takes the remaining column. Returns `None` when the two column indices are equal or out of range.
    pub fn from_packed_byte(byte: u8) -> Option<Self> {
        let col0 = (byte & 3) as usize;
        let col1 = ((byte >> 2) & 3) as usize;
        if col0 == 3 || col1 == 3 || col0 == col1 {
            return None;
        }
        let col2 = 3 - col0 - col1;

        let sign = |bit: u8| if (byte >> bit) & 1 == 0 { 1 } else { -1 };

        let mut rows = [[0; 3]; 3];
        rows[0][col0] = sign(4);
        rows[1][col1] = sign(5);
        rows[2][col2] = sign(6);

        Some(Self { rows })
    }

    /// The inverse of `from_packed_byte`.
    pub fn to_packed_byte(&self) -> u8 {
        let col = |row: &[i8; 3]| row.iter().position(|&e| e != 0).unwrap_or(0) as u8;
        let neg = |row: &[i8; 3]| row.iter().any(|&e| e < 0) as u8;

        col(&self.rows[0])
            | (col(&self.rows[1]) << 2)
            | (neg(&self.rows[0]) << 4)
            | (neg(&self.rows[1]) << 5)
            | (neg(&self.rows[2]) << 6)
    }

    pub fn determinant(&self) -> i32 {
        let m = |r: usize, c: usize| self.rows[r][c] as i32;

        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    }

    /// Returns `true` iff this rotation flips handedness.
    pub fn is_mirroring(&self) -> bool {
        self.determinant() < 0
    }

    pub fn transpose(&self) -> Self {
        let mut rows = [[0; 3]; 3];
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &e) in row.iter().enumerate() {
                rows[c][r] = e;
            }
        }

        Self { rows }
    }

    /// Saturates at the `i32` bounds rather than overflowing.
    pub fn apply_i(&self, p: Point3i) -> Point3i {
        let row = |r: usize| {
            let [a, b, c] = self.rows[r];
            (a as i32)
                .saturating_mul(p.x())
                .saturating_add((b as i32).saturating_mul(p.y()))
                .saturating_add((c as i32).saturating_mul(p.z()))
        };

        PointN([row(0), row(1), row(2)])
    }

    pub fn apply_f(&self, p: Point3f) -> Point3f {
        let row = |r: usize| {
            let [a, b, c] = self.rows[r];
            a as f32 * p.x() + b as f32 * p.y() + c as f32 * p.z()
        };

        PointN([row(0), row(1), row(2)])
    }
}

impl Mul for Rotation3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut rows = [[0; 3]; 3];
        for (r, out_row) in rows.iter_mut().enumerate() {
            for (c, out) in out_row.iter_mut().enumerate() {
                *out = (0..3)
                    .map(|k| self.rows[r][k] * rhs.rows[k][c])
                    .sum::<i8>();
            }
        }

        Self { rows }
    }
}

/// A rigid (possibly mirroring) transform on the voxel lattice: first rotate, then translate.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Transform3 {
    pub rotation: Rotation3,
    pub translation: Point3i,
}

impl Transform3 {
    pub const IDENTITY: Self = Self {
        rotation: Rotation3::IDENTITY,
        translation: Point3i::ZERO,
    };

    pub fn new(rotation: Rotation3, translation: Point3i) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Composes `self` (the parent) with `child`, returning the transform that applies `child` first:
    ///
    /// `parent ∘ child = (parent.rot · child.rot, parent.rot · child.trans + parent.trans)`
    /// Translations saturate at the `i32` bounds, so a hostile `_t` can't overflow the composition.
    pub fn then_child(&self, child: &Self) -> Self {
        Self {
            rotation: self.rotation * child.rotation,
            translation: saturating_add(self.rotation.apply_i(child.translation), self.translation),
        }
    }

    pub fn apply_i(&self, p: Point3i) -> Point3i {
        saturating_add(self.rotation.apply_i(p), self.translation)
    }
}

fn saturating_add(a: Point3i, b: Point3i) -> Point3i {
    PointN([
        a.x().saturating_add(b.x()),
        a.y().saturating_add(b.y()),
        a.z().saturating_add(b.z()),
    ])
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
