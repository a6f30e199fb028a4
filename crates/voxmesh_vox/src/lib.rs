#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Reading MagicaVoxel `.vox` files.
//!
//! `parse_vox` decodes the chunk stream into a `VoxFile`: the palette, one `VoxModel` per `SIZE`/`XYZI` pair, and the scene
//! graph of transform, group and shape nodes. `SceneGraph` then resolves the world transform of every shape instance.
//!
//! ```
//! use voxmesh_vox::{parse_vox, SceneGraph};
//! # let bytes = utilities::vox_writer::VoxWriter::new().model([1, 1, 1], &[[0, 0, 0, 1]]).build();
//!
//! let file = parse_vox(&bytes)?;
//! let graph = SceneGraph::new(&file);
//! for instance in graph.instances() {
//!     let transform = graph.world_transform(&instance, 0);
//!     let model = graph.model_at(&instance, 0);
//!     println!("{:?} {:?}", transform, model);
//! }
//! # Ok::<(), voxmesh_vox::VoxError>(())
//! ```

mod error;
mod material;
mod model;
mod node;
mod palette;
mod parser;
mod reader;
mod scene_graph;

pub use error::VoxError;
pub use material::{Layer, Material};
pub use model::{VoxColor, VoxModel, Voxel};
pub use node::{GroupNode, ShapeModel, ShapeNode, TransformFrame, TransformNode};
pub use palette::{Rgba, VoxPalette};
pub use parser::{parse_vox, read_vox_file};
pub use scene_graph::{InstanceKind, SceneGraph, ShapeInstance};

use indexmap::IndexMap;

/// A string dictionary as stored in node and material chunks, in file order.
pub type Dict = IndexMap<String, String>;

/// Everything decoded from one `.vox` file. Read-only once parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxFile {
    pub version: u32,
    pub palette: VoxPalette,
    pub models: Vec<VoxModel>,
    pub transforms: IndexMap<u32, TransformNode>,
    pub groups: IndexMap<u32, GroupNode>,
    pub shapes: IndexMap<u32, ShapeNode>,
    pub materials: Vec<Material>,
    pub layers: Vec<Layer>,
}

impl VoxFile {
    pub(crate) fn empty(version: u32) -> Self {
        Self {
            version,
            palette: VoxPalette::default(),
            models: Vec::new(),
            transforms: IndexMap::new(),
            groups: IndexMap::new(),
            shapes: IndexMap::new(),
            materials: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// The total number of scene graph nodes.
    pub fn num_nodes(&self) -> usize {
        self.transforms.len() + self.groups.len() + self.shapes.len()
    }

    pub fn layer(&self, id: i32) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id as i32 == id)
    }
}
