use super::face::{FaceRect, OrientedCubeFace, CUBE_FACES};

use voxmesh_core::prelude::*;
use voxmesh_storage::{prelude::*, IsEmpty, MaterialVoxel};

/// How neighboring visible faces are allowed to merge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MergeMode {
    /// Merge any visible faces, regardless of color. The atlas supplies per-texel color.
    Boundary,
    /// Only merge visible faces of the same color. Every `FaceRect` carries its color.
    PerColor,
}

impl Default for MergeMode {
    fn default() -> Self {
        MergeMode::Boundary
    }
}

/// The "Greedy Meshing" algorithm described by Mikola Lysenko in the [0fps
/// article](https://0fps.net/2012/06/30/meshing-in-a-minecraft-game/).
///
/// Every visible face of a non-empty voxel in `voxels` becomes part of exactly one `FaceRect`. A face is visible when the
/// neighboring voxel across it is empty or outside of the array. Rectangles are in the array's coordinates and tagged
/// with `model_index`.
///
/// Each of the six faces is swept one slice at a time. Within a slice, the first unvisited visible face in row-major (V,
/// then U) order starts a rectangle that grows along U as far as it can, then along V for as long as each whole row
/// matches. This is deterministic but not a minimal cover.
pub fn extract_faces<T>(voxels: &Array3<T>, mode: MergeMode, model_index: u32) -> Vec<FaceRect>
where
    T: IsEmpty + MaterialVoxel<Material = u8>,
{
    let _span = tracing::info_span!("extract_faces", model_index).entered();

    let mut rects = Vec::new();
    for face in CUBE_FACES.iter() {
        extract_faces_for_face(voxels, mode, model_index, face, &mut rects);
    }
    tracing::debug!("Extracted {} faces", rects.len());

    rects
}

fn extract_faces_for_face<T>(
    voxels: &Array3<T>,
    mode: MergeMode,
    model_index: u32,
    face: &OrientedCubeFace,
    rects: &mut Vec<FaceRect>,
) where
    T: IsEmpty + MaterialVoxel<Material = u8>,
{
    let OrientedCubeFace {
        n_sign,
        permutation,
        n,
        u,
        v,
    } = *face;

    let Extent3i { minimum, shape } = *voxels.extent();
    let [n_axis, u_axis, v_axis] = permutation.axes();
    let num_slices = shape.at(n_axis.index());
    let slice_width = shape.at(u_axis.index());
    let slice_height = shape.at(v_axis.index());
    if num_slices <= 0 || slice_width <= 0 || slice_height <= 0 {
        return;
    }

    let n_stride = voxels.stride_from_local_point(Local(n));
    let u_stride = voxels.stride_from_local_point(Local(u));
    let v_stride = voxels.stride_from_local_point(Local(v));

    // The mask holds the merge key of each visible face in the slice. Faces only merge when their keys are equal.
    let mut mask: Vec<Option<Option<u8>>> = vec![None; (slice_width * slice_height) as usize];

    for d in 0..num_slices {
        let neighbor_d = d + n_sign;
        let has_neighbor = neighbor_d >= 0 && neighbor_d < num_slices;

        let mut row_stride = n_stride * d as usize;
        for row in mask.chunks_mut(slice_width as usize) {
            let mut s = row_stride;
            for cell in row.iter_mut() {
                let voxel = &voxels[s];
                let visible = !voxel.is_empty()
                    && (!has_neighbor || {
                        let neighbor = if n_sign > 0 { s + n_stride } else { s - n_stride };
                        voxels[neighbor].is_empty()
                    });
                *cell = if visible {
                    Some(match mode {
                        MergeMode::Boundary => None,
                        MergeMode::PerColor => Some(voxel.material()),
                    })
                } else {
                    None
                };
                s += u_stride;
            }
            row_stride += v_stride;
        }

        let plane = minimum.at(n_axis.index()) + if n_sign > 0 { d + 1 } else { d };
        let u_origin = minimum.at(u_axis.index());
        let v_origin = minimum.at(v_axis.index());
        merge_mask(&mut mask, slice_width, slice_height, |mu, mv, w, h, color| {
            rects.push(FaceRect {
                face: *face,
                u_min: u_origin + mu,
                u_max: u_origin + mu + w,
                v_min: v_origin + mv,
                v_max: v_origin + mv + h,
                plane,
                color,
                placement: None,
                model_index,
            })
        });
    }
}

/// Greedily covers the `Some` cells of a row-major `width x height` mask with rectangles of equal keys. Every covered cell
/// is reset to `None`. Calls `emit(u, v, width, height, key)` for each rectangle.
fn merge_mask<K>(
    mask: &mut [Option<K>],
    width: i32,
    height: i32,
    mut emit: impl FnMut(i32, i32, i32, i32, K),
) where
    K: Copy + Eq,
{
    let index = |u: i32, v: i32| (v * width + u) as usize;

    for v in 0..height {
        let mut u = 0;
        while u < width {
            let key = match mask[index(u, v)] {
                Some(key) => key,
                None => {
                    u += 1;
                    continue;
                }
            };

            let row_matches = |mask: &[Option<K>], row: i32, len: i32| {
                (0..len).all(|i| mask[index(u + i, row)] == Some(key))
            };

            let mut quad_width = 1;
            while u + quad_width < width && mask[index(u + quad_width, v)] == Some(key) {
                quad_width += 1;
            }

            let mut quad_height = 1;
            while v + quad_height < height && row_matches(mask, v + quad_height, quad_width) {
                quad_height += 1;
            }

            for row in v..v + quad_height {
                for cell in &mut mask[index(u, row)..index(u + quad_width, row)] {
                    *cell = None;
                }
            }

            emit(u, v, quad_width, quad_height, key);
            u += quad_width;
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
