mod half_edge;
mod t_junction;

pub use half_edge::{Corner, FaceId, HalfEdgeId, HalfEdgeMesh, VertexId};
pub use t_junction::{split_t_junctions_exhaustive, split_t_junctions_spatial_grid, t_junction_param};

use crate::{PosNormTexMesh, Shading};
use voxmesh_core::NormSquared;

/// How T-junction candidates are found.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TJunctionDetection {
    /// Test every vertex against every edge, sequentially.
    Exhaustive,
    /// Test vertices in parallel against nearby boundary edges only.
    SpatialGrid,
}

impl Default for TJunctionDetection {
    fn default() -> Self {
        TJunctionDetection::Exhaustive
    }
}

/// Welds near-duplicate vertices and splits edges at T-junctions, so that neighboring merged quads of different sizes
/// share vertices along their common border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopologyRepair {
    /// Edges shorter than this (squared) are collapsed.
    pub weld_epsilon_sq: f32,
    /// Vertices closer than this (squared) to the interior of an edge split it.
    pub t_junction_epsilon_sq: f32,
    pub detection: TJunctionDetection,
    /// Determines how normals are recomputed afterwards.
    pub shading: Shading,
}

impl Default for TopologyRepair {
    fn default() -> Self {
        Self {
            weld_epsilon_sq: 1e-12,
            t_junction_epsilon_sq: 1e-8,
            detection: TJunctionDetection::default(),
            shading: Shading::default(),
        }
    }
}

/// What `TopologyRepair::repair` changed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RepairStats {
    pub num_collapsed: usize,
    pub num_split: usize,
}

impl TopologyRepair {
    pub fn repair(&self, mesh: &PosNormTexMesh) -> (PosNormTexMesh, RepairStats) {
        let _span = tracing::info_span!("repair_topology", num_triangles = mesh.num_triangles()).entered();

        let mut topology = HalfEdgeMesh::from_mesh(mesh, self.weld_epsilon_sq);
        let mut stats = RepairStats::default();

        for (a, b) in topology.edges() {
            let short = (topology.position(b) - topology.position(a)).norm_squared() < self.weld_epsilon_sq;
            if short && topology.collapse_edge(a, b) {
                stats.num_collapsed += 1;
            }
        }

        stats.num_split = match self.detection {
            TJunctionDetection::Exhaustive => {
                split_t_junctions_exhaustive(&mut topology, self.t_junction_epsilon_sq)
            }
            TJunctionDetection::SpatialGrid => {
                split_t_junctions_spatial_grid(&mut topology, self.t_junction_epsilon_sq)
            }
        };

        topology.garbage_collect();
        topology.recompute_normals(self.shading == Shading::Smooth);
        tracing::debug!(
            "Collapsed {} edges, split {} edges",
            stats.num_collapsed,
            stats.num_split
        );

        (topology.to_mesh(), stats)
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
    use crate::{assemble_mesh, extract_faces, AtlasPlacement, MergeMode, MeshTransform};

    use voxmesh_core::prelude::*;
    use voxmesh_storage::{prelude::*, IsEmpty, MaterialVoxel};

    #[derive(Clone, Copy)]
    struct Solid(bool);

    impl IsEmpty for Solid {
        fn is_empty(&self) -> bool {
            !self.0
        }
    }

    impl MaterialVoxel for Solid {
        type Material = u8;

        fn material(&self) -> u8 {
            1
        }
    }

    /// A 2x2x2 cube with one corner missing. Its greedy faces meet in T-junctions.
    fn notched_cube_mesh() -> PosNormTexMesh {
        let extent = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([2; 3]));
        let mut voxels = Array3::fill(extent, Solid(true));
        voxels.fill_extent(
            &Extent3i::from_min_and_shape(PointN([1; 3]), PointN([1; 3])),
            Solid(false),
        );

        let mut rects = extract_faces(&voxels, MergeMode::Boundary, 0);
        for (i, rect) in rects.iter_mut().enumerate() {
            rect.placement = Some(AtlasPlacement {
                x: 4 * i as u32,
                y: 0,
            });
        }

        assemble_mesh(&rects, [128, 4], Shading::Flat, &MeshTransform::default())
    }

    fn has_t_junction(mesh: &HalfEdgeMesh, epsilon_sq: f32) -> bool {
        let edges = mesh.edges();
        mesh.connected_vertices().into_iter().any(|v| {
            edges.iter().any(|&(a, b)| {
                a != v
                    && b != v
                    && t_junction_param(mesh.position(v), mesh.position(a), mesh.position(b), epsilon_sq)
                        .is_some()
            })
        })
    }

    #[test]
    fn repair_closes_t_junctions_and_preserves_area() {
        let mesh = notched_cube_mesh();
        let before = HalfEdgeMesh::from_mesh(&mesh, 1e-12);
        assert!(has_t_junction(&before, 1e-8));

        for detection in [TJunctionDetection::Exhaustive, TJunctionDetection::SpatialGrid].iter() {
            let repair = TopologyRepair {
                detection: *detection,
                ..Default::default()
            };

            let (repaired, stats) = repair.repair(&mesh);

            assert!(stats.num_split > 0);
            assert!((repaired.surface_area() - mesh.surface_area()).abs() < 1e-4);
            let after = HalfEdgeMesh::from_mesh(&repaired, 1e-12);
            assert!(!has_t_junction(&after, 1e-8), "{:?}", detection);
        }
    }

    #[test]
    fn repaired_cube_is_closed() {
        let mesh = notched_cube_mesh();

        let (repaired, _) = TopologyRepair::default().repair(&mesh);

        let topology = HalfEdgeMesh::from_mesh(&repaired, 1e-12);
        for (a, b) in topology.edges() {
            assert!(!topology.is_boundary_edge(a, b));
        }
    }

    #[test]
    fn no_two_vertices_within_weld_distance() {
        let (repaired, _) = TopologyRepair::default().repair(&notched_cube_mesh());

        let topology = HalfEdgeMesh::from_mesh(&repaired, 0.0);
        let vertices = topology.connected_vertices();
        for (i, a) in vertices.iter().enumerate() {
            for b in vertices[i + 1..].iter() {
                let d = (topology.position(*a) - topology.position(*b)).norm_squared();
                assert!(d >= 1e-12);
            }
        }
    }

    #[test]
    fn flat_normals_stay_axis_aligned() {
        let (repaired, _) = TopologyRepair::default().repair(&notched_cube_mesh());

        for n in repaired.normals.iter() {
            let ones = n.iter().filter(|c| (c.abs() - 1.0).abs() < 1e-5).count();
            let zeros = n.iter().filter(|c| c.abs() < 1e-5).count();
            assert_eq!((ones, zeros), (1, 2), "{:?}", n);
        }
    }
}
