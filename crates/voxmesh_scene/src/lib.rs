#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! The conversion pipeline from a parsed `.vox` file to a `Scene` of textured meshes.
//!
//! For every visible shape instance (and frame), `convert` extracts greedy faces from the model, packs and paints an
//! atlas for them, assembles a mesh in scene space and optionally repairs its T-junctions. How atlases and materials
//! are shared, and everything else that can be tuned, lives in `ConvertConfig`.
//!
//! ```
//! use voxmesh_scene::{convert_bytes, ConvertConfig};
//! # let bytes = utilities::vox_writer::VoxWriter::new().model([1, 1, 1], &[[0, 0, 0, 1]]).build();
//!
//! let (scene, report) = convert_bytes(&bytes, &ConvertConfig::default())?;
//! assert_eq!(scene.meshes.len(), 1);
//! assert!(report.skipped.is_empty());
//! # Ok::<(), voxmesh_scene::ConvertError>(())
//! ```

mod config;
mod error;
mod pipeline;
mod scene;

pub use config::{ConvertConfig, MaterialMode};
pub use error::{ConvertError, SkipReason};
pub use pipeline::{convert, convert_bytes, convert_file, ConvertReport, SkippedInstance};
pub use scene::{Matrix4, Scene, SceneMaterial, SceneMesh, SceneNode, Texture, IDENTITY_MATRIX};
