use crate::{
    ConvertConfig, ConvertError, MaterialMode, Scene, SceneMaterial, SceneMesh, SceneNode,
    SkipReason, Texture,
};

use voxmesh_core::prelude::*;
use voxmesh_image::{pack_atlas, synthesize_atlas};
use voxmesh_mesh::{assemble_mesh, extract_faces, FaceRect, MeshTransform, PosNormTexMesh};
use voxmesh_storage::prelude::*;
use voxmesh_vox::{
    parse_vox, read_vox_file, InstanceKind, SceneGraph, ShapeInstance, VoxColor, VoxFile,
    VoxModel,
};

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

/// A (shape, frame) pair that was left out of the scene.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedInstance {
    /// The shape node id, or the model index for files without a scene graph.
    pub shape_id: u32,
    pub frame: u32,
    pub reason: SkipReason,
}

/// What happened during a conversion, besides the scene itself.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConvertReport {
    /// The number of merged faces over all meshes.
    pub num_faces: usize,
    pub num_collapsed_edges: usize,
    pub num_split_edges: usize,
    pub skipped: Vec<SkippedInstance>,
}

pub fn convert_file(
    path: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<(Scene, ConvertReport), ConvertError> {
    let file = read_vox_file(path)?;

    convert(&file, config)
}

pub fn convert_bytes(
    bytes: &[u8],
    config: &ConvertConfig,
) -> Result<(Scene, ConvertReport), ConvertError> {
    let file = parse_vox(bytes)?;

    convert(&file, config)
}

/// Meshes every visible shape instance of `file`.
///
/// Instances that can't be meshed are recorded in the report and left out. Fails only if nothing in the file could be
/// meshed at all.
pub fn convert(
    file: &VoxFile,
    config: &ConvertConfig,
) -> Result<(Scene, ConvertReport), ConvertError> {
    let _span = tracing::info_span!("convert", num_models = file.models.len()).entered();

    if file.models.is_empty() {
        return Err(ConvertError::NoModels);
    }

    let mut report = ConvertReport::default();
    let jobs = collect_jobs(file, config, &mut report.skipped);
    if jobs.is_empty() {
        return Err(ConvertError::NoModels);
    }

    let mut converter = Converter {
        file,
        config,
        colors: file.models.iter().map(VoxModel::color_array).collect(),
        scene: Scene::default(),
        report,
    };
    match config.material_mode {
        MaterialMode::PerMesh => converter.convert_per_mesh(&jobs),
        MaterialMode::Shared => converter.convert_shared(&jobs),
    }

    let Converter {
        mut scene, report, ..
    } = converter;
    if config.center_world {
        scene.center();
    }
    tracing::info!(
        "Converted {} meshes with {} faces, skipped {} instances",
        scene.meshes.len(),
        report.num_faces,
        report.skipped.len()
    );

    Ok((scene, report))
}

/// One (instance, frame) pair with a model to mesh.
#[derive(Clone, Debug)]
struct MeshJob {
    name: String,
    shape_id: u32,
    frame: u32,
    model_index: u32,
    transform: Transform3,
}

impl MeshJob {
    fn skip(&self, reason: SkipReason) -> SkippedInstance {
        SkippedInstance {
            shape_id: self.shape_id,
            frame: self.frame,
            reason,
        }
    }
}

fn collect_jobs(
    file: &VoxFile,
    config: &ConvertConfig,
    skipped: &mut Vec<SkippedInstance>,
) -> Vec<MeshJob> {
    let graph = SceneGraph::new(file);

    let mut jobs = Vec::new();
    for instance in graph.instances() {
        let shape_id = instance.id();
        if instance.hidden {
            tracing::debug!("Skipping hidden instance {:?}", instance.kind);
            skipped.push(SkippedInstance {
                shape_id,
                frame: 0,
                reason: SkipReason::Hidden,
            });
            continue;
        }

        let frames: &[u32] = if config.all_frames {
            instance.frames.as_slice()
        } else {
            &[0]
        };
        for &frame in frames {
            let model_index = match graph.model_at(&instance, frame) {
                Some(m) => m,
                None => {
                    tracing::debug!("{:?} has no model for frame {}", instance.kind, frame);
                    skipped.push(SkippedInstance {
                        shape_id,
                        frame,
                        reason: SkipReason::NoModelForFrame,
                    });
                    continue;
                }
            };

            jobs.push(MeshJob {
                name: node_name(&instance, frame, frames.len()),
                shape_id,
                frame,
                model_index,
                transform: graph.world_transform(&instance, frame),
            });
        }
    }

    jobs
}

fn node_name(instance: &ShapeInstance, frame: u32, num_frames: usize) -> String {
    let base = match (&instance.name, instance.kind) {
        (Some(name), _) => name.clone(),
        (None, InstanceKind::Shape(id)) => format!("shape_{}", id),
        (None, InstanceKind::LooseModel(i)) => format!("model_{}", i),
    };

    if num_frames > 1 {
        format!("{}_frame{}", base, frame)
    } else {
        base
    }
}

struct Converter<'a> {
    file: &'a VoxFile,
    config: &'a ConvertConfig,
    colors: Vec<Array3<VoxColor>>,
    scene: Scene,
    report: ConvertReport,
}

impl<'a> Converter<'a> {
    fn extract(&self, model_index: u32) -> Vec<FaceRect> {
        extract_faces(
            &self.colors[model_index as usize],
            self.config.merge_mode,
            model_index,
        )
    }

    /// Paints the atlas for `rects`, which must have been packed into a square of side `size`.
    fn add_texture(&mut self, name: String, size: u32, rects: &[FaceRect]) -> usize {
        let palette = &self.file.palette;
        let image = synthesize_atlas([size, size], rects, &self.colors, |voxel| {
            palette.color(voxel.map_or(0, VoxColor::index)).0
        });
        self.scene.textures.push(Texture { name, image });

        self.scene.textures.len() - 1
    }

    fn add_material(&mut self, name: String, texture_index: usize) -> usize {
        self.scene.materials.push(SceneMaterial {
            name,
            texture_index,
        });

        self.scene.materials.len() - 1
    }

    fn add_mesh(&mut self, job: &MeshJob, rects: &[FaceRect], atlas_size: u32, material_index: usize) {
        let mesh = self.build_mesh(job, rects, atlas_size);
        self.scene.meshes.push(SceneMesh {
            mesh,
            material_index,
        });

        let mut node = SceneNode::new(job.name.clone());
        node.meshes.push(self.scene.meshes.len() - 1);
        self.scene.root.children.push(node);
    }

    fn build_mesh(&mut self, job: &MeshJob, rects: &[FaceRect], atlas_size: u32) -> PosNormTexMesh {
        let model = &self.file.models[job.model_index as usize];
        let transform = MeshTransform::new(
            model.extent(),
            self.config.pivot_for(job.model_index),
            &job.transform,
        );
        let mesh = assemble_mesh(
            rects,
            [atlas_size, atlas_size],
            self.config.shading,
            &transform,
        );
        self.report.num_faces += rects.len();

        match self.config.topology_repair() {
            Some(repair) => {
                let (repaired, stats) = repair.repair(&mesh);
                self.report.num_collapsed_edges += stats.num_collapsed;
                self.report.num_split_edges += stats.num_split;

                repaired
            }
            None => mesh,
        }
    }

    /// One atlas, texture and material per job.
    fn convert_per_mesh(&mut self, jobs: &[MeshJob]) {
        for job in jobs.iter() {
            let mut rects = self.extract(job.model_index);
            if rects.is_empty() {
                self.report.skipped.push(job.skip(SkipReason::NoFaces));
                continue;
            }

            let size = match pack_atlas(
                &mut rects,
                self.config.atlas_sizing,
                self.config.max_atlas_size,
            ) {
                Ok(size) => size,
                Err(e) => {
                    tracing::warn!("Abandoning {}: {}", job.name, e);
                    self.report.skipped.push(job.skip(e.into()));
                    continue;
                }
            };

            let texture_index = self.add_texture(format!("{}_atlas", job.name), size, &rects);
            let material_index = self.add_material(format!("{}_material", job.name), texture_index);
            self.add_mesh(job, &rects, size, material_index);
        }
    }

    /// Every distinct model gets one set of tiles in a single atlas, shared by all jobs.
    fn convert_shared(&mut self, jobs: &[MeshJob]) {
        let mut rects = Vec::new();
        let mut model_ranges = BTreeMap::<u32, Range<usize>>::new();
        for job in jobs.iter() {
            if model_ranges.contains_key(&job.model_index) {
                continue;
            }
            let start = rects.len();
            rects.extend(self.extract(job.model_index));
            model_ranges.insert(job.model_index, start..rects.len());
        }

        let (meshable, empty): (Vec<&MeshJob>, Vec<&MeshJob>) = jobs
            .iter()
            .partition(|job| !model_ranges[&job.model_index].is_empty());
        for job in empty {
            self.report.skipped.push(job.skip(SkipReason::NoFaces));
        }
        if meshable.is_empty() {
            return;
        }

        let size = match pack_atlas(
            &mut rects,
            self.config.atlas_sizing,
            self.config.max_atlas_size,
        ) {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!("Abandoning the shared atlas: {}", e);
                for job in meshable {
                    self.report.skipped.push(job.skip(e.clone().into()));
                }
                return;
            }
        };

        let texture_index = self.add_texture("atlas".to_string(), size, &rects);
        let material_index = self.add_material("material".to_string(), texture_index);
        for job in meshable {
            let range = model_ranges[&job.model_index].clone();
            self.add_mesh(job, &rects[range], size, material_index);
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
