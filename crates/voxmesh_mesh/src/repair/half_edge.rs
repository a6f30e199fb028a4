use crate::PosNormTexMesh;

use voxmesh_core::prelude::*;
use voxmesh_storage::SmallKeyHashMap;

use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(pub u32);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FaceId(pub u32);

/// One directed use of an edge: from corner `corner` of `face` to the next corner.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HalfEdgeId {
    pub face: FaceId,
    pub corner: u8,
}

/// The attributes a face carries at one of its corners. Faces meeting at a vertex may disagree, e.g. along UV seams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    pub normal: Point3f,
    pub uv: [f32; 2],
}

impl Corner {
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            normal: self.normal + (other.normal - self.normal) * t,
            uv: [
                self.uv[0] + (other.uv[0] - self.uv[0]) * t,
                self.uv[1] + (other.uv[1] - self.uv[1]) * t,
            ],
        }
    }
}

#[derive(Clone, Debug)]
struct Vertex {
    position: Point3f,
    faces: Vec<FaceId>,
    deleted: bool,
}

#[derive(Clone, Debug)]
struct Face {
    vertices: [VertexId; 3],
    corners: [Corner; 3],
    deleted: bool,
}

/// A triangle mesh stored as an arena of vertices and faces, addressed by integer handles.
///
/// Half-edges are implicit: corner `k` of a face starts the half-edge to corner `k + 1`. A map from `(from, to)` vertex
/// pairs to half-edges gives twin lookups. Each directed edge may be used by at most one face, so every edge borders
/// one or two faces.
///
/// Removing an element only marks it deleted. `garbage_collect` compacts the arena.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    half_edges: SmallKeyHashMap<(VertexId, VertexId), HalfEdgeId>,
}

impl HalfEdgeMesh {
    /// Builds a mesh from `mesh`, merging vertices that share a position. Positions merge when they round to the same
    /// multiple of `1e-4`, or when they lie within `weld_epsilon_sq` (squared distance) of each other.
    ///
    /// Degenerate triangles are dropped. A triangle that would reuse a directed edge gets its own copies of its
    /// vertices.
    pub fn from_mesh(mesh: &PosNormTexMesh, weld_epsilon_sq: f32) -> Self {
        let mut out = Self::default();
        let mut welder = PositionWelder::new(weld_epsilon_sq);
        let ids: Vec<VertexId> = mesh
            .positions
            .iter()
            .map(|p| welder.find_or_insert(&mut out, PointN(*p)))
            .collect();

        let mut num_degenerate = 0;
        let mut num_detached = 0;
        for tri in mesh.indices.chunks_exact(3) {
            let vertices = [
                ids[tri[0] as usize],
                ids[tri[1] as usize],
                ids[tri[2] as usize],
            ];
            let corner = |i: u32| Corner {
                normal: PointN(mesh.normals[i as usize]),
                uv: mesh.tex_coords[i as usize],
            };
            let corners = [corner(tri[0]), corner(tri[1]), corner(tri[2])];

            if vertices[0] == vertices[1] || vertices[1] == vertices[2] || vertices[2] == vertices[0] {
                num_degenerate += 1;
                continue;
            }
            if out.add_face(vertices, corners).is_none() {
                num_detached += 1;
                let copies = [
                    out.add_vertex(out.position(vertices[0])),
                    out.add_vertex(out.position(vertices[1])),
                    out.add_vertex(out.position(vertices[2])),
                ];
                out.add_face(copies, corners);
            }
        }
        if num_degenerate > 0 || num_detached > 0 {
            tracing::debug!(
                "Dropped {} degenerate triangles, detached {} non-manifold triangles",
                num_degenerate,
                num_detached
            );
        }

        out
    }

    /// Writes out every live face. Corners of a vertex share one output vertex when their quantized attributes agree.
    pub fn to_mesh(&self) -> PosNormTexMesh {
        let mut mesh = PosNormTexMesh::default();
        let mut out_vertices = SmallKeyHashMap::<(VertexId, [i64; 3], [i64; 2]), u32>::default();

        for face in self.faces.iter().filter(|f| !f.deleted) {
            for k in 0..3 {
                let v = face.vertices[k];
                let corner = face.corners[k];
                let key = (
                    v,
                    [
                        (corner.normal.x() * 1000.0).round() as i64,
                        (corner.normal.y() * 1000.0).round() as i64,
                        (corner.normal.z() * 1000.0).round() as i64,
                    ],
                    [
                        (corner.uv[0] * 100_000.0).round() as i64,
                        (corner.uv[1] * 100_000.0).round() as i64,
                    ],
                );
                let index = *out_vertices.entry(key).or_insert_with(|| {
                    mesh.positions.push(self.vertices[v.0 as usize].position.0);
                    mesh.normals.push(corner.normal.0);
                    mesh.tex_coords.push(corner.uv);

                    mesh.positions.len() as u32 - 1
                });
                mesh.indices.push(index);
            }
        }

        mesh
    }

    pub fn add_vertex(&mut self, position: Point3f) -> VertexId {
        self.vertices.push(Vertex {
            position,
            faces: Vec::new(),
            deleted: false,
        });

        VertexId(self.vertices.len() as u32 - 1)
    }

    /// Adds a triangle, unless it repeats a vertex or one of its directed edges is already used by another face.
    pub fn add_face(&mut self, vertices: [VertexId; 3], corners: [Corner; 3]) -> Option<FaceId> {
        let [a, b, c] = vertices;
        if a == b || b == c || c == a {
            return None;
        }
        if vertices.iter().any(|v| self.vertex(*v).deleted) {
            return None;
        }
        if (0..3).any(|k| self.half_edges.contains_key(&(vertices[k], vertices[(k + 1) % 3]))) {
            return None;
        }

        let id = FaceId(self.faces.len() as u32);
        self.faces.push(Face {
            vertices,
            corners,
            deleted: false,
        });
        for k in 0..3 {
            self.half_edges.insert(
                (vertices[k], vertices[(k + 1) % 3]),
                HalfEdgeId {
                    face: id,
                    corner: k as u8,
                },
            );
            self.vertices[vertices[k].0 as usize].faces.push(id);
        }

        Some(id)
    }

    pub fn remove_face(&mut self, f: FaceId) {
        let face = &mut self.faces[f.0 as usize];
        if face.deleted {
            return;
        }
        face.deleted = true;
        let vertices = face.vertices;

        for k in 0..3 {
            self.half_edges.remove(&(vertices[k], vertices[(k + 1) % 3]));
            self.vertices[vertices[k].0 as usize]
                .faces
                .retain(|other| *other != f);
        }
    }

    fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0 as usize]
    }

    pub fn position(&self, v: VertexId) -> Point3f {
        self.vertex(v).position
    }

    pub fn half_edge(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.half_edges.get(&(from, to)).copied()
    }

    /// True when only one face uses the edge between `a` and `b`.
    pub fn is_boundary_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.half_edge(a, b).is_some() != self.half_edge(b, a).is_some()
    }

    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.faces[f.0 as usize].vertices
    }

    pub fn face_corners(&self, f: FaceId) -> [Corner; 3] {
        self.faces[f.0 as usize].corners
    }

    pub fn vertex_faces(&self, v: VertexId) -> &[FaceId] {
        &self.vertex(v).faces
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.iter().filter(|v| !v.deleted).count()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.iter().filter(|f| !f.deleted).count()
    }

    /// Live vertices that belong to at least one face.
    pub fn connected_vertices(&self) -> Vec<VertexId> {
        (0..self.vertices.len() as u32)
            .map(VertexId)
            .filter(|v| {
                let vertex = self.vertex(*v);
                !vertex.deleted && !vertex.faces.is_empty()
            })
            .collect()
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.deleted)
            .map(|(i, _)| FaceId(i as u32))
    }

    /// Every edge once, as the `(from, to)` of one of its half-edges, in face order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::new();
        for face in self.faces.iter().filter(|f| !f.deleted) {
            for k in 0..3 {
                let (a, b) = (face.vertices[k], face.vertices[(k + 1) % 3]);
                if a < b || self.half_edge(b, a).is_none() {
                    edges.push((a, b));
                }
            }
        }

        edges
    }

    fn neighbors(&self, v: VertexId) -> BTreeSet<VertexId> {
        self.vertex(v)
            .faces
            .iter()
            .flat_map(|f| self.faces[f.0 as usize].vertices.iter().copied())
            .filter(|n| *n != v)
            .collect()
    }

    /// Merges `remove` into `keep` along their shared edge. Faces on the edge disappear and `remove`'s other faces are
    /// reattached to `keep`.
    ///
    /// Refuses (returning `false`) when the vertices don't share an edge, when they have common neighbors that don't sit
    /// across the edge, or when a reattached face would reuse a directed edge or land back to back with another face.
    pub fn collapse_edge(&mut self, keep: VertexId, remove: VertexId) -> bool {
        if keep == remove || self.vertex(keep).deleted || self.vertex(remove).deleted {
            return false;
        }
        if self.half_edge(keep, remove).is_none() && self.half_edge(remove, keep).is_none() {
            return false;
        }

        let edge_faces: BTreeSet<FaceId> = self
            .vertex(remove)
            .faces
            .iter()
            .copied()
            .filter(|f| self.face_vertices(*f).contains(&keep))
            .collect();
        let across_edge: BTreeSet<VertexId> = edge_faces
            .iter()
            .flat_map(|f| self.face_vertices(*f).to_vec())
            .filter(|v| *v != keep && *v != remove)
            .collect();
        let common: BTreeSet<VertexId> = self
            .neighbors(keep)
            .intersection(&self.neighbors(remove))
            .copied()
            .collect();
        if common != across_edge {
            return false;
        }

        let originals: Vec<(FaceId, Face)> = self
            .vertex(remove)
            .faces
            .iter()
            .map(|f| (*f, self.faces[f.0 as usize].clone()))
            .collect();
        for (f, _) in originals.iter() {
            self.remove_face(*f);
        }

        let mut reattached = Vec::new();
        for (f, face) in originals.iter() {
            if edge_faces.contains(f) {
                continue;
            }
            let mut vertices = face.vertices;
            for v in vertices.iter_mut() {
                if *v == remove {
                    *v = keep;
                }
            }
            let added = if self.has_face_on(vertices) {
                None
            } else {
                self.add_face(vertices, face.corners)
            };
            match added {
                Some(new_face) => reattached.push(new_face),
                None => {
                    for new_face in reattached {
                        self.remove_face(new_face);
                    }
                    for (_, face) in originals.iter() {
                        self.add_face(face.vertices, face.corners);
                    }
                    return false;
                }
            }
        }
        self.vertices[remove.0 as usize].deleted = true;

        true
    }

    /// True if some face already spans exactly these vertices, in either orientation.
    fn has_face_on(&self, vertices: [VertexId; 3]) -> bool {
        self.vertex(vertices[0]).faces.iter().any(|f| {
            let other = self.face_vertices(*f);
            vertices.iter().all(|v| other.contains(v))
        })
    }

    /// Splits the edge between `a` and `b` at the existing vertex `v`, which should lie on the segment. Each face on
    /// the edge becomes two faces, and their corners at `v` interpolate the corners at `a` and `b`.
    ///
    /// Refuses (returning `false`) when `v` is already connected to the edge's faces in a way that would reuse a
    /// directed edge, or when there is no such edge.
    pub fn split_edge(&mut self, a: VertexId, b: VertexId, v: VertexId) -> bool {
        if v == a || v == b || self.vertex(v).deleted {
            return false;
        }

        let pa = self.position(a);
        let ab = self.position(b) - pa;
        let len_sq = ab.norm_squared();
        if len_sq <= 0.0 {
            return false;
        }
        let t = ((self.position(v) - pa).dot(&ab) / len_sq).max(0.0).min(1.0);

        let mut splits = Vec::with_capacity(2);
        for &(from, to, t_from) in [(a, b, t), (b, a, 1.0 - t)].iter() {
            let he = match self.half_edge(from, to) {
                Some(he) => he,
                None => continue,
            };
            let k = he.corner as usize;
            let face = &self.faces[he.face.0 as usize];
            let opposite = face.vertices[(k + 2) % 3];
            if opposite == v {
                return false;
            }
            let new_edges = [(from, v), (v, to), (v, opposite), (opposite, v)];
            if new_edges.iter().any(|e| self.half_edges.contains_key(e)) {
                return false;
            }
            let mid = face.corners[k].lerp(&face.corners[(k + 1) % 3], t_from);
            splits.push((he.face, k, from, to, opposite, mid, face.corners));
        }
        if splits.is_empty() {
            return false;
        }

        for (f, k, from, to, opposite, mid, corners) in splits {
            let (c_from, c_to, c_opposite) = (corners[k], corners[(k + 1) % 3], corners[(k + 2) % 3]);
            self.remove_face(f);
            self.add_face([from, v, opposite], [c_from, mid, c_opposite]);
            self.add_face([v, to, opposite], [mid, c_to, c_opposite]);
        }

        true
    }

    /// Recomputes every corner normal from the geometry. With `smooth`, the corners of a vertex share the area-weighted
    /// average of its face normals; otherwise each corner takes its face's normal. Degenerate faces keep their normals.
    pub fn recompute_normals(&mut self, smooth: bool) {
        let face_normals: Vec<Option<Point3f>> = self
            .faces
            .iter()
            .map(|face| {
                if face.deleted {
                    return None;
                }
                let [a, b, c] = face.vertices;
                let pa = self.position(a);

                Some((self.position(b) - pa).cross(&(self.position(c) - pa)))
            })
            .collect();

        let vertex_normals: Vec<Option<Point3f>> = if smooth {
            self.vertices
                .iter()
                .map(|vertex| {
                    let sum = vertex
                        .faces
                        .iter()
                        .filter_map(|f| face_normals[f.0 as usize])
                        .fold(Point3f::ZERO, |sum, n| sum + n);

                    sum.normalized()
                })
                .collect()
        } else {
            Vec::new()
        };

        for (face, face_normal) in self.faces.iter_mut().zip(face_normals.into_iter()) {
            if face.deleted {
                continue;
            }
            let face_normal = face_normal.and_then(|n| n.normalized());
            for k in 0..3 {
                let normal = if smooth {
                    vertex_normals[face.vertices[k].0 as usize]
                } else {
                    face_normal
                };
                if let Some(normal) = normal {
                    face.corners[k].normal = normal;
                }
            }
        }
    }

    /// Drops deleted faces and vertices that are deleted or unused, renumbering what remains.
    pub fn garbage_collect(&mut self) {
        let mut new_ids = vec![None; self.vertices.len()];
        let mut vertices = Vec::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            if !vertex.deleted && !vertex.faces.is_empty() {
                new_ids[i] = Some(VertexId(vertices.len() as u32));
                vertices.push(Vertex {
                    position: vertex.position,
                    faces: Vec::new(),
                    deleted: false,
                });
            }
        }

        let faces: Vec<Face> = self.faces.drain(..).filter(|f| !f.deleted).collect();
        self.vertices = vertices;
        self.half_edges.clear();
        for face in faces {
            let mut remapped = face.vertices;
            for v in remapped.iter_mut() {
                // Live faces only reference live vertices.
                if let Some(id) = new_ids[v.0 as usize] {
                    *v = id;
                }
            }
            self.add_face(remapped, face.corners);
        }
    }
}

/// Finds an existing vertex at (nearly) the same position.
struct PositionWelder {
    cells: SmallKeyHashMap<[i64; 3], Vec<VertexId>>,
    epsilon_sq: f32,
}

impl PositionWelder {
    const QUANTUM: f32 = 1e4;

    fn new(epsilon_sq: f32) -> Self {
        Self {
            cells: SmallKeyHashMap::default(),
            epsilon_sq,
        }
    }

    fn cell(p: Point3f) -> [i64; 3] {
        [
            (p.x() * Self::QUANTUM).round() as i64,
            (p.y() * Self::QUANTUM).round() as i64,
            (p.z() * Self::QUANTUM).round() as i64,
        ]
    }

    fn find_or_insert(&mut self, mesh: &mut HalfEdgeMesh, p: Point3f) -> VertexId {
        let key = Self::cell(p);
        if let Some(v) = self.cells.get(&key).and_then(|vs| vs.first()) {
            return *v;
        }

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = [key[0] + dx, key[1] + dy, key[2] + dz];
                    if let Some(vs) = self.cells.get(&neighbor) {
                        if let Some(v) = vs
                            .iter()
                            .find(|v| (mesh.position(**v) - p).norm_squared() <= self.epsilon_sq)
                        {
                            return *v;
                        }
                    }
                }
            }
        }

        let v = mesh.add_vertex(p);
        self.cells.entry(key).or_insert_with(Vec::new).push(v);

        v
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

    fn corner(u: f32) -> Corner {
        Corner {
            normal: PointN([0.0, 0.0, 1.0]),
            uv: [u, 0.0],
        }
    }

    fn add_vertices(mesh: &mut HalfEdgeMesh, points: &[[f32; 3]]) -> Vec<VertexId> {
        points
            .iter()
            .map(|p| mesh.add_vertex(PointN(*p)))
            .collect()
    }

    #[test]
    fn directed_edges_are_used_once() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(&mut mesh, &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        let c = [corner(0.0); 3];

        assert!(mesh.add_face([v[0], v[1], v[2]], c).is_some());
        assert!(mesh.add_face([v[1], v[3], v[2]], c).is_some());
        // Reuses 0 -> 1.
        assert!(mesh.add_face([v[0], v[1], v[3]], c).is_none());
        assert!(mesh.add_face([v[0], v[0], v[3]], c).is_none());

        assert!(mesh.is_boundary_edge(v[0], v[1]));
        assert!(!mesh.is_boundary_edge(v[1], v[2]));
        assert_eq!(mesh.edges().len(), 5);
    }

    #[test]
    fn collapse_removes_the_sliver() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(
            &mut mesh,
            &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1e-7, 0.0, 0.0]],
        );
        let c = [corner(0.0); 3];
        mesh.add_face([v[0], v[1], v[2]], c).unwrap();
        mesh.add_face([v[0], v[3], v[1]], c).unwrap();

        assert!(mesh.collapse_edge(v[0], v[3]));

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_vertices(), 3);
        assert!(mesh.vertex_faces(v[3]).is_empty());
    }

    #[test]
    fn collapse_respects_the_link_condition() {
        // A tetrahedron: collapsing any edge would leave two faces back to back.
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(
            &mut mesh,
            &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let c = [corner(0.0); 3];
        mesh.add_face([v[0], v[2], v[1]], c).unwrap();
        mesh.add_face([v[0], v[1], v[3]], c).unwrap();
        mesh.add_face([v[1], v[2], v[3]], c).unwrap();
        mesh.add_face([v[2], v[0], v[3]], c).unwrap();

        assert!(!mesh.collapse_edge(v[0], v[1]));
        assert_eq!(mesh.num_faces(), 4);
    }

    #[test]
    fn split_interpolates_corners() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(
            &mut mesh,
            &[[0.0; 3], [4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [1.0, 0.0, 0.0]],
        );
        let f = mesh
            .add_face([v[0], v[1], v[2]], [corner(0.0), corner(1.0), corner(0.5)])
            .unwrap();

        assert!(mesh.split_edge(v[0], v[1], v[3]));

        assert!(mesh.face_ids().all(|other| other != f));
        assert_eq!(mesh.num_faces(), 2);
        let he = mesh.half_edge(v[3], v[1]).unwrap();
        let corners = mesh.face_corners(he.face);
        assert_eq!(corners[he.corner as usize].uv, [0.25, 0.0]);
        assert!(mesh.half_edge(v[0], v[1]).is_none());
    }

    #[test]
    fn split_applies_to_both_sides() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(
            &mut mesh,
            &[
                [0.0; 3],
                [2.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 0.0, 0.0],
            ],
        );
        let c = [corner(0.0); 3];
        mesh.add_face([v[0], v[1], v[2]], c).unwrap();
        mesh.add_face([v[1], v[0], v[3]], c).unwrap();

        assert!(mesh.split_edge(v[0], v[1], v[4]));

        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.vertex_faces(v[4]).len(), 4);
        assert!(!mesh.is_boundary_edge(v[0], v[4]));
    }

    #[test]
    fn round_trip_merges_shared_positions() {
        let quad = PosNormTexMesh {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                // Duplicates of 0 and 2 with a different UV.
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 6],
            tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, 0.5], [0.5, 0.5]],
            indices: vec![0, 1, 2, 4, 5, 3],
        };

        let mesh = HalfEdgeMesh::from_mesh(&quad, 1e-12);

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert!(!mesh.is_boundary_edge(mesh.face_vertices(FaceId(0))[0], mesh.face_vertices(FaceId(0))[2]));

        let out = mesh.to_mesh();
        assert_eq!(out.positions.len(), 6);
        assert_eq!(out.indices.len(), 6);
    }

    #[test]
    fn garbage_collection_compacts() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(
            &mut mesh,
            &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 5.0, 5.0]],
        );
        let f = mesh.add_face([v[0], v[1], v[2]], [corner(0.0); 3]).unwrap();
        mesh.remove_face(f);
        mesh.add_face([v[0], v[1], v[2]], [corner(0.0); 3]).unwrap();

        mesh.garbage_collect();

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.face_ids().collect::<Vec<_>>(), vec![FaceId(0)]);
    }

    #[test]
    fn flat_normals_follow_the_winding() {
        let mut mesh = HalfEdgeMesh::default();
        let v = add_vertices(&mut mesh, &[[0.0; 3], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        let f = mesh.add_face([v[0], v[1], v[2]], [corner(0.0); 3]).unwrap();

        mesh.recompute_normals(false);

        for c in mesh.face_corners(f).iter() {
            assert_eq!(c.normal, PointN([0.0, 0.0, -1.0]));
        }
    }
}
