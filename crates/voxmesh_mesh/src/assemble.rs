use super::{
    face::{AtlasPlacement, FaceRect},
    PosNormTexMesh,
};

use voxmesh_core::prelude::*;
use voxmesh_storage::SmallKeyHashMap;

/// How vertex normals are produced.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Shading {
    /// Every vertex keeps the normal of its face. Vertices only weld within a plane.
    Flat,
    /// Vertices weld regardless of normal, and welded normals are averaged.
    Smooth,
}

impl Default for Shading {
    fn default() -> Self {
        Shading::Flat
    }
}

/// Places a model's lattice geometry in the output scene.
///
/// Positions are recentered on `pivot`, rotated, moved by `translation`, and finally converted from the Z-up voxel
/// convention to a right-handed Y-up one by swapping Y with Z and negating X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    pub pivot: Point3f,
    pub rotation: Rotation3,
    pub translation: Point3f,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            pivot: Point3f::ZERO,
            rotation: Rotation3::IDENTITY,
            translation: Point3f::ZERO,
        }
    }
}

impl MeshTransform {
    /// The pivot lies at `fraction` of the way through `pivot_box` along each axis.
    pub fn new(pivot_box: &Extent3i, fraction: [f32; 3], transform: &Transform3) -> Self {
        let min = Point3f::from(pivot_box.minimum);
        let shape = Point3f::from(pivot_box.shape);
        let pivot = PointN([
            min.x() + shape.x() * fraction[0],
            min.y() + shape.y() * fraction[1],
            min.z() + shape.z() * fraction[2],
        ]);

        Self {
            pivot,
            rotation: transform.rotation,
            translation: transform.translation.into(),
        }
    }

    pub fn apply_position(&self, p: Point3f) -> Point3f {
        let mut out = (self.rotation.apply_f(p - self.pivot) + self.translation).xzy();
        *out.x_mut() = -out.x();

        out
    }

    pub fn apply_normal(&self, n: Point3f) -> Point3f {
        let mut out = self.rotation.apply_f(n).xzy();
        *out.x_mut() = -out.x();

        out
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct WeldKey {
    position: [i64; 3],
    /// Omitted under smooth shading.
    normal: Option<[i64; 3]>,
    uv: [i64; 2],
    color: Option<u8>,
}

fn quantize(x: f32, scale: f32) -> i64 {
    (x * scale).round() as i64
}

struct MeshBuilder {
    mesh: PosNormTexMesh,
    welded: SmallKeyHashMap<WeldKey, u32>,
    atlas_size: [f32; 2],
    shading: Shading,
}

impl MeshBuilder {
    fn weld(&mut self, position: Point3f, normal: Point3f, uv: [f32; 2], color: Option<u8>) -> u32 {
        let [w, h] = self.atlas_size;
        let key = WeldKey {
            position: [
                quantize(position.x(), 100.0),
                quantize(position.y(), 100.0),
                quantize(position.z(), 100.0),
            ],
            normal: match self.shading {
                Shading::Flat => Some([
                    quantize(normal.x(), 1000.0),
                    quantize(normal.y(), 1000.0),
                    quantize(normal.z(), 1000.0),
                ]),
                Shading::Smooth => None,
            },
            uv: [quantize(uv[0], w * 100.0), quantize(uv[1], h * 100.0)],
            color,
        };

        let mesh = &mut self.mesh;
        let index = *self.welded.entry(key).or_insert_with(|| {
            mesh.positions.push(position.0);
            mesh.normals.push([0.0; 3]);
            mesh.tex_coords.push(uv);

            mesh.positions.len() as u32 - 1
        });

        match self.shading {
            Shading::Flat => self.mesh.normals[index as usize] = normal.0,
            Shading::Smooth => {
                let sum = &mut self.mesh.normals[index as usize];
                for i in 0..3 {
                    sum[i] += normal.at(i);
                }
            }
        }

        index
    }
}

/// Converts packed `rects` into one welded, indexed mesh.
///
/// Each corner's UV addresses the interior of the rect's tile in an atlas of `atlas_size` pixels, with V pointing up.
/// Corners that agree on quantized position, normal (flat shading only), UV and color share a vertex. Triangles wind
/// counter-clockwise around the face normal even when `transform` mirrors the model.
pub fn assemble_mesh(
    rects: &[FaceRect],
    atlas_size: [u32; 2],
    shading: Shading,
    transform: &MeshTransform,
) -> PosNormTexMesh {
    let _span = tracing::info_span!("assemble_mesh", num_rects = rects.len()).entered();

    let mut builder = MeshBuilder {
        mesh: PosNormTexMesh::default(),
        welded: SmallKeyHashMap::default(),
        atlas_size: [atlas_size[0].max(1) as f32, atlas_size[1].max(1) as f32],
        shading,
    };
    let mirrored = transform.rotation.is_mirroring();

    let mut num_unplaced = 0;
    for rect in rects.iter() {
        let placement = rect.placement.unwrap_or_else(|| {
            num_unplaced += 1;
            AtlasPlacement { x: 0, y: 0 }
        });

        let corners = rect.corners();
        let corner_uvs = rect.corner_uvs();
        let normal = rect.face.mesh_normal();
        let [w, h] = builder.atlas_size;

        let mut indices = [0; 4];
        for i in 0..4 {
            let [px, py] = rect.atlas_pixel(placement, corner_uvs[i]);
            let uv = [px as f32 / w, 1.0 - py as f32 / h];
            indices[i] = builder.weld(corners[i].into(), normal, uv, rect.color);
        }

        let [c0, c1, c2, _] = corners;
        let counter_clockwise =
            ((c1 - c0).cross(&(c2 - c0)).dot(&rect.face.signed_normal()) > 0) != mirrored;
        let [i0, i1, i2, i3] = indices;
        let triangles = if counter_clockwise {
            [i0, i1, i2, i0, i2, i3]
        } else {
            [i0, i2, i1, i0, i3, i2]
        };
        builder.mesh.indices.extend_from_slice(&triangles);
    }
    if num_unplaced > 0 {
        tracing::warn!("{} faces were never packed into an atlas", num_unplaced);
    }

    let MeshBuilder { mut mesh, .. } = builder;
    for (position, normal) in mesh.positions.iter_mut().zip(mesh.normals.iter_mut()) {
        let n = PointN(*normal);
        // Accumulated normals may cancel out; keep the zero vector rather than dividing by it.
        let n = n.normalized().unwrap_or(n);
        *position = transform.apply_position(PointN(*position)).0;
        *normal = transform.apply_normal(n).0;
    }

    mesh
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
    use crate::{extract_faces, MergeMode};

    use pretty_assertions::assert_eq;
    use voxmesh_storage::prelude::*;

    #[derive(Clone, Copy)]
    struct Solid(bool);

    impl voxmesh_storage::IsEmpty for Solid {
        fn is_empty(&self) -> bool {
            !self.0
        }
    }

    impl voxmesh_storage::MaterialVoxel for Solid {
        type Material = u8;

        fn material(&self) -> u8 {
            1
        }
    }

    fn packed_cube_faces(shape: Point3i) -> Vec<FaceRect> {
        let voxels = Array3::fill(Extent3i::from_min_and_shape(Point3i::ZERO, shape), Solid(true));
        let mut rects = extract_faces(&voxels, MergeMode::Boundary, 0);
        for (i, rect) in rects.iter_mut().enumerate() {
            rect.placement = Some(AtlasPlacement {
                x: 8 * i as u32,
                y: 0,
            });
        }

        rects
    }

    /// Every triangle's geometric normal must agree with its vertex normals.
    fn assert_front_facing(mesh: &PosNormTexMesh) {
        for tri in mesh.indices.chunks(3) {
            let p: Vec<Point3f> = tri.iter().map(|&i| PointN(mesh.positions[i as usize])).collect();
            let n = PointN(mesh.normals[tri[0] as usize]);
            let geometric = (p[1] - p[0]).cross(&(p[2] - p[0]));
            assert!(geometric.dot(&n) > 0.0, "{:?} vs {:?}", geometric, n);
        }
    }

    #[test]
    fn cube_has_four_vertices_per_face_under_flat_shading() {
        let rects = packed_cube_faces(PointN([2, 3, 4]));

        let mesh = assemble_mesh(&rects, [64, 8], Shading::Flat, &MeshTransform::default());

        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_front_facing(&mesh);
    }

    #[test]
    fn welding_is_deterministic() {
        let rects = packed_cube_faces(PointN([3, 1, 2]));

        let a = assemble_mesh(&rects, [64, 8], Shading::Smooth, &MeshTransform::default());
        let b = assemble_mesh(&rects, [64, 8], Shading::Smooth, &MeshTransform::default());

        assert_eq!(a.positions, b.positions);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn corners_sharing_every_attribute_are_welded() {
        let rect = |u_min, tile_x| FaceRect {
            face: crate::CUBE_FACES[5],
            u_min,
            u_max: u_min + 1,
            v_min: 0,
            v_max: 1,
            plane: 1,
            color: None,
            placement: Some(AtlasPlacement { x: tile_x, y: 0 }),
            model_index: 0,
        };

        // Adjacent tiles: the shared edge lands on the same atlas pixels.
        let touching = assemble_mesh(
            &[rect(0, 0), rect(1, 1)],
            [4, 4],
            Shading::Flat,
            &MeshTransform::default(),
        );
        let apart = assemble_mesh(
            &[rect(0, 0), rect(1, 2)],
            [4, 4],
            Shading::Flat,
            &MeshTransform::default(),
        );

        assert_eq!(touching.positions.len(), 6);
        assert_eq!(apart.positions.len(), 8);
        assert_eq!(touching.indices.len(), 12);
    }

    #[test]
    fn uvs_address_the_tile_interior() {
        let mut rects = packed_cube_faces(PointN([1, 1, 1]));
        rects.truncate(1);
        rects[0].placement = Some(AtlasPlacement { x: 2, y: 4 });

        let mesh = assemble_mesh(&rects, [8, 8], Shading::Flat, &MeshTransform::default());

        let mut us: Vec<f32> = mesh.tex_coords.iter().map(|t| t[0]).collect();
        let mut vs: Vec<f32> = mesh.tex_coords.iter().map(|t| t[1]).collect();
        us.sort_by(|a, b| a.partial_cmp(b).unwrap());
        vs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(us, vec![3.0 / 8.0, 3.0 / 8.0, 4.0 / 8.0, 4.0 / 8.0]);
        assert_eq!(vs, vec![1.0 - 6.0 / 8.0, 1.0 - 6.0 / 8.0, 1.0 - 5.0 / 8.0, 1.0 - 5.0 / 8.0]);
    }

    #[test]
    fn smooth_shading_averages_corner_normals() {
        let rects: Vec<FaceRect> = packed_cube_faces(PointN([1, 1, 1]))
            .into_iter()
            .map(|mut r| {
                // Give every face the same tile so the cube corners weld.
                r.placement = Some(AtlasPlacement { x: 0, y: 0 });
                r
            })
            .collect();

        let mesh = assemble_mesh(&rects, [3, 3], Shading::Smooth, &MeshTransform::default());

        assert!(mesh.positions.len() < 24);
        for normal in mesh.normals.iter() {
            let n = PointN(*normal);
            assert!((n.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn smooth_shading_welds_across_faces_sharing_position_and_uv() {
        let rect = |face| FaceRect {
            face,
            u_min: 0,
            u_max: 1,
            v_min: 0,
            v_max: 1,
            plane: 0,
            color: None,
            placement: Some(AtlasPlacement { x: 0, y: 0 }),
            model_index: 0,
        };
        // -X and -Y share the edge x = y = 0, but only the origin corner lands on the same pixel in both tiles.
        let rects = [rect(crate::CUBE_FACES[0]), rect(crate::CUBE_FACES[1])];

        let flat = assemble_mesh(&rects, [3, 3], Shading::Flat, &MeshTransform::default());
        let smooth = assemble_mesh(&rects, [3, 3], Shading::Smooth, &MeshTransform::default());

        assert_eq!(flat.positions.len(), 8);
        assert_eq!(smooth.positions.len(), 7);

        let origin = smooth
            .positions
            .iter()
            .position(|p| *p == [0.0; 3])
            .unwrap();
        assert_eq!(smooth.indices.iter().filter(|&&i| i as usize == origin).count(), 4);
        // (-1, -1, 0) averaged, then taken to Y-up.
        let expected = PointN([0.5f32.sqrt(), 0.0, -(0.5f32.sqrt())]);
        assert!((PointN(smooth.normals[origin]) - expected).norm() < 1e-5);
    }

    #[test]
    fn transform_recenters_rotates_and_swizzles() {
        let pivot_box = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([2, 4, 6]));
        let transform = MeshTransform::new(
            &pivot_box,
            [0.5; 3],
            &Transform3::new(Rotation3::IDENTITY, PointN([10, 20, 30])),
        );

        assert_eq!(transform.pivot, PointN([1.0, 2.0, 3.0]));
        // (x, y, z) -> (-(x + tx), z + tz, y + ty), after recentering.
        assert_eq!(
            transform.apply_position(PointN([1.0, 2.0, 3.0])),
            PointN([-10.0, 30.0, 20.0])
        );
        assert_eq!(
            transform.apply_normal(PointN([1.0, 0.0, 0.0])),
            PointN([-1.0, 0.0, 0.0])
        );
        assert_eq!(
            transform.apply_normal(PointN([0.0, 0.0, 1.0])),
            PointN([0.0, 1.0, 0.0])
        );
    }

    #[test]
    fn mirroring_rotation_keeps_triangles_front_facing() {
        let rects = packed_cube_faces(PointN([2, 2, 1]));
        let mirror = Rotation3 {
            rows: [[-1, 0, 0], [0, 1, 0], [0, 0, 1]],
        };
        assert!(mirror.is_mirroring());

        for rotation in [Rotation3::IDENTITY, mirror].iter() {
            let transform = MeshTransform {
                rotation: *rotation,
                ..Default::default()
            };
            let mesh = assemble_mesh(&rects, [64, 8], Shading::Flat, &transform);
            assert_front_facing(&mesh);
        }
    }
}
