use crate::{node::TransformNode, VoxFile};

use voxmesh_core::prelude::*;
use voxmesh_storage::SmallKeyHashMap;

/// Parent lookups over the node graph of a `VoxFile`.
///
/// The child-to-transform and child-to-group indices are built once, so every parent step is a hash lookup.
pub struct SceneGraph<'a> {
    file: &'a VoxFile,
    /// Maps a node id to the transform node whose child it is.
    transform_of_child: SmallKeyHashMap<u32, u32>,
    /// Maps a node id to the group node that lists it.
    group_of_child: SmallKeyHashMap<u32, u32>,
}

/// Where an instance's voxels come from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InstanceKind {
    /// A shape node in the scene graph.
    Shape(u32),
    /// A model of a file without any shape nodes, placed at the origin.
    LooseModel(u32),
}

/// One placement of voxel data in the scene.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShapeInstance {
    pub kind: InstanceKind,
    /// The `_name` of the transform node that places the shape.
    pub name: Option<String>,
    /// Set if any transform or group on the path to the root is hidden, or on a hidden layer.
    pub hidden: bool,
    /// The animation frames this instance distinguishes, ascending and starting at 0. Only frames where a shape model or a
    /// transform on the path is keyed are listed.
    pub frames: Vec<u32>,
}

impl ShapeInstance {
    /// The shape node id, or the model index for loose models.
    pub fn id(&self) -> u32 {
        match self.kind {
            InstanceKind::Shape(id) | InstanceKind::LooseModel(id) => id,
        }
    }
}

impl<'a> SceneGraph<'a> {
    pub fn new(file: &'a VoxFile) -> Self {
        let mut transform_of_child = SmallKeyHashMap::default();
        for (id, node) in file.transforms.iter() {
            if let Some(previous) = transform_of_child.insert(node.child_id, *id) {
                tracing::debug!(
                    "Node {} is the child of transforms {} and {}; using {}",
                    node.child_id,
                    previous,
                    id,
                    id
                );
            }
        }

        let mut group_of_child = SmallKeyHashMap::default();
        for (id, group) in file.groups.iter() {
            for child in group.children.iter() {
                group_of_child.insert(*child, *id);
            }
        }

        Self {
            file,
            transform_of_child,
            group_of_child,
        }
    }

    /// The transform node that places `node_id` directly.
    pub fn transform_of(&self, node_id: u32) -> Option<&'a TransformNode> {
        self.transform_of_child
            .get(&node_id)
            .and_then(|t| self.file.transforms.get(t))
    }

    /// The parent of a transform node: an explicit `_parent` attribute if it names a transform node, else the transform that
    /// places the group listing this transform.
    pub fn parent_transform(&self, transform: &TransformNode) -> Option<&'a TransformNode> {
        if let Some(parent) = transform
            .explicit_parent()
            .and_then(|id| self.file.transforms.get(&id))
        {
            return Some(parent);
        }

        self.group_of_child
            .get(&transform.id)
            .and_then(|group_id| self.transform_of(*group_id))
    }

    /// The transforms from the one placing `node_id` up to the root, child first.
    ///
    /// The walk stops after as many steps as there are nodes, so a cyclic graph can't loop forever.
    fn transform_chain(&self, node_id: u32) -> Vec<&'a TransformNode> {
        let max_depth = self.file.num_nodes();

        let mut chain = Vec::new();
        let mut current = self.transform_of(node_id);
        while let Some(transform) = current {
            if chain.len() >= max_depth {
                tracing::warn!(
                    "Scene graph cycle above node {}; stopping at depth {}",
                    node_id,
                    max_depth
                );
                break;
            }
            chain.push(transform);
            current = self.parent_transform(transform);
        }

        chain
    }

    /// Resolves the world transform of `node_id` at `frame`. Identity if no transform places the node.
    pub fn resolve(&self, node_id: u32, frame: u32) -> Transform3 {
        self.transform_chain(node_id)
            .iter()
            .rev()
            .fold(Transform3::IDENTITY, |world, t| {
                world.then_child(&t.transform(frame))
            })
    }

    /// Every instance to convert, in file order.
    pub fn instances(&self) -> Vec<ShapeInstance> {
        if self.file.shapes.is_empty() {
            return (0..self.file.models.len() as u32)
                .map(|i| ShapeInstance {
                    kind: InstanceKind::LooseModel(i),
                    name: None,
                    hidden: false,
                    frames: vec![0],
                })
                .collect();
        }

        self.file
            .shapes
            .values()
            .map(|shape| {
                let chain = self.transform_chain(shape.id);
                let hidden = chain.iter().any(|t| self.is_transform_hidden(t));
                let mut frames: Vec<u32> = chain
                    .iter()
                    .flat_map(|t| 0..t.frames.len() as u32)
                    .chain(shape.keyframes())
                    .chain(std::iter::once(0))
                    .collect();
                frames.sort_unstable();
                frames.dedup();

                ShapeInstance {
                    kind: InstanceKind::Shape(shape.id),
                    name: chain.first().and_then(|t| t.name()).map(str::to_string),
                    hidden,
                    frames,
                }
            })
            .collect()
    }

    fn is_transform_hidden(&self, transform: &TransformNode) -> bool {
        let layer_hidden = self
            .file
            .layer(transform.layer_id)
            .map(|l| l.is_hidden())
            .unwrap_or(false);
        let group_hidden = self
            .file
            .groups
            .get(&transform.child_id)
            .map(|g| g.is_hidden())
            .unwrap_or(false);

        transform.is_hidden() || layer_hidden || group_hidden
    }

    /// The world transform of `instance` at `frame`.
    pub fn world_transform(&self, instance: &ShapeInstance, frame: u32) -> Transform3 {
        match instance.kind {
            InstanceKind::Shape(id) => self.resolve(id, frame),
            InstanceKind::LooseModel(_) => Transform3::IDENTITY,
        }
    }

    /// The index of the model `instance` shows at `frame`, if any.
    pub fn model_at(&self, instance: &ShapeInstance, frame: u32) -> Option<u32> {
        let model_id = match instance.kind {
            InstanceKind::Shape(id) => self.file.shapes.get(&id)?.model_at(frame)?,
            InstanceKind::LooseModel(i) => {
                if frame != 0 {
                    return None;
                }
                i
            }
        };

        if (model_id as usize) < self.file.models.len() {
            Some(model_id)
        } else {
            tracing::warn!("Shape references missing model {}", model_id);
            None
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse_vox;

    use pretty_assertions::assert_eq;
    use utilities::vox_writer::VoxWriter;

    /// root (0) -> group (1) -> transform (2, t = [10, 0, 0], rotated 90 degrees about Z) -> shape (3)
    ///                       -> transform (4, t = [0, 0, 5], hidden) -> shape (5)
    fn two_shape_scene() -> Vec<u8> {
        VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .model([2, 2, 2], &[[1, 1, 1, 2]])
            .transform(0, &[], 1, -1, &[&[("_t", "0 0 1")]])
            .group(1, &[], &[2, 4])
            // Rows: [0, -1, 0], [1, 0, 0], [0, 0, 1] => column bits 0b01_00 | 0b00_01, row 0 negated.
            .transform(2, &[("_name", "a")], 3, 0, &[&[("_t", "10 0 0"), ("_r", "17")]])
            .shape(3, &[], &[(0, &[])])
            .transform(4, &[("_hidden", "1")], 5, 0, &[&[("_t", "0 0 5")]])
            .shape(5, &[], &[(1, &[])])
            .build()
    }

    #[test]
    fn rotation_byte_in_fixture() {
        let r = Rotation3::from_packed_byte(17).unwrap();

        assert_eq!(r.rows, [[0, -1, 0], [1, 0, 0], [0, 0, 1]]);
    }

    #[test]
    fn resolve_composes_parent_to_child() {
        let file = parse_vox(&two_shape_scene()).unwrap();
        let graph = SceneGraph::new(&file);

        let world = graph.resolve(3, 0);

        assert_eq!(world.translation, PointN([10, 0, 1]));
        assert_eq!(world.rotation, Rotation3::from_packed_byte(17).unwrap());

        let world = graph.resolve(5, 0);
        assert_eq!(world.translation, PointN([0, 0, 6]));
        assert_eq!(world.rotation, Rotation3::IDENTITY);
    }

    #[test]
    fn unplaced_node_resolves_to_identity() {
        let file = parse_vox(&two_shape_scene()).unwrap();
        let graph = SceneGraph::new(&file);

        assert_eq!(graph.resolve(99, 0), Transform3::IDENTITY);
    }

    #[test]
    fn explicit_parent_takes_precedence() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .transform(10, &[], 11, -1, &[&[("_t", "100 0 0")]])
            .group(11, &[], &[])
            .transform(0, &[], 1, -1, &[&[("_t", "1 0 0")]])
            .group(1, &[], &[2])
            .transform(2, &[("_parent", "10")], 3, -1, &[&[("_t", "0 1 0")]])
            .shape(3, &[], &[(0, &[])])
            .build();
        let file = parse_vox(&bytes).unwrap();
        let graph = SceneGraph::new(&file);

        assert_eq!(graph.resolve(3, 0).translation, PointN([100, 1, 0]));
    }

    #[test]
    fn cyclic_graph_terminates() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .transform(0, &[], 1, -1, &[&[("_t", "1 0 0")]])
            .group(1, &[], &[2])
            .transform(2, &[], 3, -1, &[&[("_t", "1 0 0")]])
            .group(3, &[], &[0, 4])
            .transform(4, &[], 5, -1, &[&[]])
            .shape(5, &[], &[(0, &[])])
            .build();
        let file = parse_vox(&bytes).unwrap();
        let graph = SceneGraph::new(&file);

        // 4 -> 2 -> 0 -> 2 -> 0 -> 2, cut off at the node count.
        let chain: Vec<u32> = graph.transform_chain(5).iter().map(|t| t.id).collect();
        assert_eq!(file.num_nodes(), 6);
        assert_eq!(chain, vec![4, 2, 0, 2, 0, 2]);

        let world = graph.resolve(5, 0);
        assert_eq!(world.rotation, Rotation3::IDENTITY);
        assert_eq!(world.translation, PointN([5, 0, 0]));
        assert_eq!(graph.instances().len(), 1);
    }

    #[test]
    fn instances_carry_names_and_visibility() {
        let file = parse_vox(&two_shape_scene()).unwrap();
        let graph = SceneGraph::new(&file);

        let instances = graph.instances();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].kind, InstanceKind::Shape(3));
        assert_eq!(instances[0].name.as_deref(), Some("a"));
        assert!(!instances[0].hidden);
        assert!(instances[1].hidden);
        assert_eq!(graph.model_at(&instances[1], 0), Some(1));
        assert_eq!(graph.model_at(&instances[1], 1), None);
    }

    #[test]
    fn hidden_layer_hides_instance() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .transform(0, &[], 1, 3, &[&[]])
            .shape(1, &[], &[(0, &[])])
            .layer(3, &[("_hidden", "1")])
            .build();
        let file = parse_vox(&bytes).unwrap();

        assert!(SceneGraph::new(&file).instances()[0].hidden);
    }

    #[test]
    fn loose_models_without_scene_graph() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .model([1, 1, 1], &[[0, 0, 0, 2]])
            .build();
        let file = parse_vox(&bytes).unwrap();
        let graph = SceneGraph::new(&file);

        let instances = graph.instances();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].kind, InstanceKind::LooseModel(1));
        assert_eq!(graph.model_at(&instances[1], 0), Some(1));
        assert_eq!(graph.world_transform(&instances[1], 0), Transform3::IDENTITY);
    }

    #[test]
    fn frame_count_spans_transforms_and_models() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .transform(0, &[], 1, -1, &[&[], &[("_t", "0 0 1")], &[]])
            .shape(1, &[], &[(0, &[])])
            .build();
        let file = parse_vox(&bytes).unwrap();
        let graph = SceneGraph::new(&file);

        let instances = graph.instances();

        assert_eq!(instances[0].frames, vec![0, 1, 2]);
        assert_eq!(graph.resolve(1, 1).translation, PointN([0, 0, 1]));
        // Clamped to the last frame.
        assert_eq!(graph.resolve(1, 9).translation, PointN([0, 0, 0]));
    }

    #[test]
    fn frames_list_only_keyed_frames() {
        let bytes = VoxWriter::new()
            .model([1, 1, 1], &[[0, 0, 0, 1]])
            .model([1, 1, 1], &[[0, 0, 0, 2]])
            .transform(0, &[], 1, -1, &[&[], &[]])
            .shape(1, &[], &[(0, &[("_f", "7")]), (1, &[("_f", "4294967295")])])
            .build();
        let file = parse_vox(&bytes).unwrap();
        let graph = SceneGraph::new(&file);

        let instances = graph.instances();

        assert_eq!(instances[0].frames, vec![0, 1, 7, u32::MAX]);
        assert_eq!(graph.model_at(&instances[0], u32::MAX), Some(1));
        assert_eq!(graph.model_at(&instances[0], 1), None);
    }
}
