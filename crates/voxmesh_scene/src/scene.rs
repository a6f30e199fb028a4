use voxmesh_core::prelude::*;
use voxmesh_image::{atlas_bytes, AtlasImage};
use voxmesh_mesh::PosNormTexMesh;

/// The result of converting one `.vox` file, ready to be handed to a mesh format writer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
    pub textures: Vec<Texture>,
    pub root: SceneNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneMesh {
    pub mesh: PosNormTexMesh,
    /// Index into `Scene::materials`.
    pub material_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneMaterial {
    pub name: String,
    /// Index into `Scene::textures`, used as the diffuse map.
    pub texture_index: usize,
}

/// An RGBA atlas texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub image: AtlasImage,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.image.extent().shape.x() as u32
    }

    pub fn height(&self) -> u32 {
        self.image.extent().shape.y() as u32
    }

    /// Rows top to bottom, 4 bytes per texel.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        atlas_bytes(&self.image)
    }
}

/// Row-major 4x4 matrix.
pub type Matrix4 = [[f32; 4]; 4];

pub const IDENTITY_MATRIX: Matrix4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    /// Mesh vertices are already in scene space, so this is the identity for every node the converter creates.
    pub local_transform: Matrix4,
    /// Indices into `Scene::meshes`.
    pub meshes: Vec<usize>,
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new("root".to_string())
    }
}

impl SceneNode {
    pub fn new(name: String) -> Self {
        Self {
            name,
            local_transform: IDENTITY_MATRIX,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }

        self.children.iter().find_map(|c| c.find(name))
    }
}

impl Scene {
    /// Every vertex position of every mesh.
    pub fn positions(&self) -> impl Iterator<Item = &[f32; 3]> {
        self.meshes.iter().flat_map(|m| m.mesh.positions.iter())
    }

    /// The axis-aligned bounds of all vertices, as `(min, max)`. `None` if the scene has no vertices.
    pub fn bounds(&self) -> Option<(Point3f, Point3f)> {
        let mut positions = self.positions().map(|p| PointN(*p));
        let first = positions.next()?;

        Some(positions.fold((first, first), |(min, max), p| {
            (min.min_components(&p), max.max_components(&p))
        }))
    }

    /// Moves every vertex so that `bounds` are centered at the origin.
    pub fn center(&mut self) {
        let (min, max) = match self.bounds() {
            Some(b) => b,
            None => return,
        };
        let offset = (min + max) * -0.5;

        for mesh in self.meshes.iter_mut() {
            for p in mesh.mesh.positions.iter_mut() {
                *p = (PointN(*p) + offset).0;
            }
        }
    }
}
