use super::half_edge::{HalfEdgeMesh, VertexId};

use voxmesh_core::prelude::*;
use voxmesh_storage::SmallKeyHashMap;

use rayon::prelude::*;
use std::cmp::Ordering;

/// The parameter of the projection of `p` onto segment `ab`, if it lands strictly inside the segment and `p` lies within
/// `epsilon_sq` (squared distance) of the segment's line.
pub fn t_junction_param(p: Point3f, a: Point3f, b: Point3f, epsilon_sq: f32) -> Option<f32> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f32::EPSILON {
        return None;
    }

    let t = (p - a).dot(&ab) / len_sq;
    if t <= 0.0 || t >= 1.0 {
        return None;
    }
    let off_line = p - (a + ab * t);

    (off_line.norm_squared() < epsilon_sq).then(|| t)
}

/// Splits edges at T-junctions, one vertex at a time, rescanning all edges after every split. Returns the number of
/// splits.
pub fn split_t_junctions_exhaustive(mesh: &mut HalfEdgeMesh, epsilon_sq: f32) -> usize {
    let mut num_splits = 0;
    for v in mesh.connected_vertices() {
        let p = mesh.position(v);
        'scan: loop {
            for (a, b) in mesh.edges() {
                if a == v || b == v {
                    continue;
                }
                if t_junction_param(p, mesh.position(a), mesh.position(b), epsilon_sq).is_some()
                    && mesh.split_edge(a, b, v)
                {
                    num_splits += 1;
                    continue 'scan;
                }
            }
            break;
        }
    }

    num_splits
}

/// Grid cells span the average edge, but never less than 1/64 of the longest edge, so no single edge covers more than
/// about 64 cells per axis.
fn grid_cell_size(lengths: &[f32]) -> f32 {
    let total: f32 = lengths.iter().sum();
    let longest = lengths.iter().copied().fold(0.0, f32::max);

    (total / lengths.len().max(1) as f32).max(longest / 64.0)
}

#[derive(Clone, Copy, Debug)]
struct SplitCandidate {
    edge: usize,
    vertex: VertexId,
    t: f32,
}

/// Finds T-junctions in parallel, then applies the splits sequentially.
///
/// Only boundary edges can carry a T-junction: the long side of a junction has no twin, because the other side is
/// covered by two shorter edges. Those edges are bucketed into a uniform grid whose cells are as wide as the average
/// boundary edge (see `grid_cell_size`), and every vertex is tested against the edges in its cell.
pub fn split_t_junctions_spatial_grid(mesh: &mut HalfEdgeMesh, epsilon_sq: f32) -> usize {
    let boundary: Vec<(VertexId, VertexId)> = mesh
        .edges()
        .into_iter()
        .filter(|(a, b)| mesh.is_boundary_edge(*a, *b))
        .collect();
    if boundary.is_empty() {
        return 0;
    }

    let lengths: Vec<f32> = boundary
        .iter()
        .map(|(a, b)| (mesh.position(*b) - mesh.position(*a)).norm())
        .collect();
    let cell_size = grid_cell_size(&lengths);
    if cell_size <= f32::EPSILON {
        return 0;
    }
    let margin = epsilon_sq.sqrt();
    let cell_of = |p: Point3f| (p * (1.0 / cell_size)).map_components(f32::floor);

    let mut grid = SmallKeyHashMap::<[i32; 3], Vec<usize>>::default();
    for (i, (a, b)) in boundary.iter().enumerate() {
        let (pa, pb) = (mesh.position(*a), mesh.position(*b));
        let lo = cell_of(pa.min_components(&pb) - Point3f::fill(margin));
        let hi = cell_of(pa.max_components(&pb) + Point3f::fill(margin));
        for x in lo.x() as i32..=hi.x() as i32 {
            for y in lo.y() as i32..=hi.y() as i32 {
                for z in lo.z() as i32..=hi.z() as i32 {
                    grid.entry([x, y, z]).or_insert_with(Vec::new).push(i);
                }
            }
        }
    }

    let vertices = mesh.connected_vertices();
    let mesh_ref = &*mesh;
    let mut candidates: Vec<SplitCandidate> = vertices
        .par_iter()
        .flat_map_iter(|&v| {
            let p = mesh_ref.position(v);
            let c = cell_of(p);
            let key = [c.x() as i32, c.y() as i32, c.z() as i32];
            let edges: &[usize] = grid.get(&key).map(Vec::as_slice).unwrap_or(&[]);

            edges
                .iter()
                .filter_map(|&edge| {
                    let (a, b) = boundary[edge];
                    if a == v || b == v {
                        return None;
                    }
                    t_junction_param(p, mesh_ref.position(a), mesh_ref.position(b), epsilon_sq)
                        .map(|t| SplitCandidate { edge, vertex: v, t })
                })
                .collect::<Vec<_>>()
        })
        .collect();
    candidates.sort_by(|x, y| {
        x.edge
            .cmp(&y.edge)
            .then(x.t.partial_cmp(&y.t).unwrap_or(Ordering::Equal))
    });

    // Walk each edge from its start, splitting off one piece per candidate.
    let mut num_splits = 0;
    let mut i = 0;
    while i < candidates.len() {
        let edge = candidates[i].edge;
        let (mut from, to) = boundary[edge];
        while i < candidates.len() && candidates[i].edge == edge {
            let v = candidates[i].vertex;
            if mesh.split_edge(from, to, v) {
                num_splits += 1;
                from = v;
            }
            i += 1;
        }
    }

    num_splits
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
