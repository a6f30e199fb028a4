//! Converts MagicaVoxel `.vox` files into textured triangle meshes.
//!
//! This library is organized into several crates:
//! - **core**: lattice points and extents, axis permutations and signed-permutation rotations
//! - **storage**: dense 2D and 3D arrays
//! - **vox**: the `.vox` parser and scene graph resolution
//! - **mesh**: greedy face extraction, mesh assembly and topology repair
//! - **image**: texture atlas packing and synthesis
//! - **scene**: the whole pipeline, from a `.vox` file to a scene of meshes, materials and textures
//!
//! Most users only need `scene::convert_file`.

pub use voxmesh_core as core;
pub use voxmesh_mesh as mesh;
pub use voxmesh_storage as storage;
pub use voxmesh_vox as vox;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
}

#[cfg(feature = "atlas")]
pub use voxmesh_image as image;

#[cfg(feature = "scene")]
pub use voxmesh_scene as scene;
