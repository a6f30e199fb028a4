#![allow(clippy::needless_range_loop, clippy::too_many_arguments)]
#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Turning voxel grids into textured triangle meshes.
//!
//! 1. `extract_faces` covers the visible faces of a voxel grid with merged `FaceRect`s.
//! 2. Once the rects are packed into an atlas (see `voxmesh_image`), `assemble_mesh` welds them into an indexed
//!    `PosNormTexMesh` placed by a `MeshTransform`.
//! 3. `TopologyRepair` welds coincident vertices and splits edges at T-junctions, so adjacent merged quads of different
//!    sizes share vertices along their seams.

mod assemble;
mod face;
mod greedy;
mod repair;

pub use assemble::*;
pub use face::*;
pub use greedy::*;
pub use repair::*;

use voxmesh_core::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PosNormTexMesh {
    pub positions: Vec<[f32; 3]>,
    /// Surface normal vectors. Normalized unless a smooth-shaded normal summed to zero.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates, AKA UVs.
    pub tex_coords: Vec<[f32; 2]>,
    /// All of the triangles in the mesh, wound counter-clockwise (right-hand rule).
    pub indices: Vec<u32>,
}

impl PosNormTexMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.tex_coords.clear();
        self.indices.clear();
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// The sum of all triangle areas.
    pub fn surface_area(&self) -> f32 {
        self.indices
            .chunks(3)
            .map(|tri| {
                let a = PointN(self.positions[tri[0] as usize]);
                let b = PointN(self.positions[tri[1] as usize]);
                let c = PointN(self.positions[tri[2] as usize]);

                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }
}
