use crate::TILE_BORDER;

use voxmesh_core::prelude::*;
use voxmesh_mesh::{AtlasPlacement, FaceRect};
use voxmesh_storage::prelude::*;

/// RGBA texels, indexed by `[x, y]` with `y = 0` at the top row.
pub type AtlasImage = Array2<[u8; 4]>;

/// Paints the tile of every placed rectangle with the colors of the voxels under it, then bleeds each tile's outermost
/// texels into its border.
///
/// `models[rect.model_index]` is the grid the rectangle was extracted from. `color` maps a voxel to its RGBA color; it
/// receives `None` for points outside of the grid. Texels not covered by any tile stay transparent black.
pub fn synthesize_atlas<T>(
    atlas_size: [u32; 2],
    rects: &[FaceRect],
    models: &[Array3<T>],
    color: impl Fn(Option<&T>) -> [u8; 4],
) -> AtlasImage {
    let _span = tracing::info_span!("synthesize_atlas", num_faces = rects.len()).entered();

    let extent = Extent2i::from_min_and_shape(
        PointN([0, 0]),
        PointN([atlas_size[0] as i32, atlas_size[1] as i32]),
    );
    let mut atlas = Array2::fill(extent, [0; 4]);

    for rect in rects.iter() {
        let placement = match rect.placement {
            Some(p) => p,
            None => {
                tracing::warn!("Skipping texels of unplaced face {:?}", rect.face);
                continue;
            }
        };
        let voxels = match models.get(rect.model_index as usize) {
            Some(v) => v,
            None => {
                tracing::warn!("Face refers to missing model {}", rect.model_index);
                continue;
            }
        };

        let origin = tile_origin(placement);
        for iy in 0..rect.height() {
            for ix in 0..rect.width() {
                let rgba = color(voxels.get(rect.texel_voxel(ix, iy)));
                if let Some(texel) = atlas.get_mut(origin + PointN([ix, iy])) {
                    *texel = rgba;
                }
            }
        }

        bleed_border(&mut atlas, origin, rect.width(), rect.height());
    }

    atlas
}

/// The texel where the interior of a tile starts.
fn tile_origin(placement: AtlasPlacement) -> Point2i {
    PointN([
        (placement.x + TILE_BORDER) as i32,
        (placement.y + TILE_BORDER) as i32,
    ])
}

/// Copies the outermost interior texels into the border of the `width` x `height` tile at `origin`. Edges are copied
/// before corners, which take the diagonally adjacent interior texel.
fn bleed_border(atlas: &mut AtlasImage, origin: Point2i, width: i32, height: i32) {
    let (x0, y0) = (origin.x(), origin.y());
    let (x1, y1) = (x0 + width - 1, y0 + height - 1);

    for x in x0..=x1 {
        copy_texel(atlas, [x, y0], [x, y0 - 1]);
        copy_texel(atlas, [x, y1], [x, y1 + 1]);
    }
    for y in y0..=y1 {
        copy_texel(atlas, [x0, y], [x0 - 1, y]);
        copy_texel(atlas, [x1, y], [x1 + 1, y]);
    }

    copy_texel(atlas, [x0, y0], [x0 - 1, y0 - 1]);
    copy_texel(atlas, [x1, y0], [x1 + 1, y0 - 1]);
    copy_texel(atlas, [x0, y1], [x0 - 1, y1 + 1]);
    copy_texel(atlas, [x1, y1], [x1 + 1, y1 + 1]);
}

fn copy_texel(atlas: &mut AtlasImage, from: [i32; 2], to: [i32; 2]) {
    let rgba = match atlas.get(PointN(from)) {
        Some(t) => *t,
        None => return,
    };
    if let Some(texel) = atlas.get_mut(PointN(to)) {
        *texel = rgba;
    }
}

/// The atlas as tightly packed RGBA bytes, rows top to bottom, with a stride of `width * 4`.
pub fn atlas_bytes(atlas: &AtlasImage) -> Vec<u8> {
    atlas.values_slice().iter().flatten().copied().collect()
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
    use crate::{pack_atlas, AtlasSizing};

    use voxmesh_core::Axis3Permutation;
    use voxmesh_mesh::{extract_faces, MergeMode, OrientedCubeFace};

    use pretty_assertions::assert_eq;

    #[derive(Clone, Copy)]
    struct Paint(u8);

    impl IsEmpty for Paint {
        fn is_empty(&self) -> bool {
            self.0 == 0
        }
    }

    impl MaterialVoxel for Paint {
        type Material = u8;

        fn material(&self) -> u8 {
            self.0
        }
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const CLEAR: [u8; 4] = [0; 4];

    fn palette(voxel: Option<&Paint>) -> [u8; 4] {
        match voxel {
            Some(Paint(1)) => RED,
            Some(Paint(2)) => GREEN,
            _ => CLEAR,
        }
    }

    /// A 2x1x1 bar: red at x = 0, green at x = 1.
    fn bar() -> Array3<Paint> {
        let extent = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([2, 1, 1]));

        Array3::new(extent, vec![Paint(1), Paint(2)]).unwrap()
    }

    fn texel(atlas: &AtlasImage, x: i32, y: i32) -> [u8; 4] {
        atlas[PointN([x, y])]
    }

    #[test]
    fn tile_interior_and_border_match_voxel_colors() {
        let models = vec![bar()];
        let mut rects: Vec<FaceRect> = extract_faces(&models[0], MergeMode::Boundary, 0)
            .into_iter()
            .filter(|r| r.face == OrientedCubeFace::new(-1, Axis3Permutation::ZXY))
            .collect();
        assert_eq!(rects.len(), 1);
        rects[0].placement = Some(AtlasPlacement { x: 0, y: 0 });

        let atlas = synthesize_atlas([4, 4], &rects, &models, palette);

        // -Z has U = X and V = Y. Seen from outside, +X points left, so U is flipped.
        let expected_rows = [
            [GREEN, GREEN, RED, RED],
            [GREEN, GREEN, RED, RED],
            [GREEN, GREEN, RED, RED],
            [CLEAR, CLEAR, CLEAR, CLEAR],
        ];
        for (y, row) in expected_rows.iter().enumerate() {
            for (x, expected) in row.iter().enumerate() {
                assert_eq!(texel(&atlas, x as i32, y as i32), *expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn every_border_texel_copies_its_neighbor() {
        let extent = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([3, 2, 2]));
        let models = vec![Array3::fill_with(extent, |p| Paint(1 + ((p.x() + p.y() + p.z()) % 2) as u8))];
        let mut rects = extract_faces(&models[0], MergeMode::Boundary, 0);
        let size = pack_atlas(&mut rects, AtlasSizing::Tight, 256).unwrap();

        let atlas = synthesize_atlas([size, size], &rects, &models, palette);

        for rect in rects.iter() {
            let o = tile_origin(rect.placement.unwrap());
            let (w, h) = (rect.width(), rect.height());
            let clamp = |x: i32, y: i32| {
                texel(
                    &atlas,
                    x.max(o.x()).min(o.x() + w - 1),
                    y.max(o.y()).min(o.y() + h - 1),
                )
            };
            for y in o.y() - 1..=o.y() + h {
                for x in o.x() - 1..=o.x() + w {
                    assert_eq!(texel(&atlas, x, y), clamp(x, y));
                    assert_ne!(texel(&atlas, x, y), CLEAR);
                }
            }
        }
    }

    #[test]
    fn texels_outside_the_grid_use_the_fallback_color() {
        let models = vec![bar()];
        let mut rect = extract_faces(&models[0], MergeMode::Boundary, 0)[0];
        rect.u_max += 3;
        rect.placement = Some(AtlasPlacement { x: 0, y: 0 });

        let atlas = synthesize_atlas([16, 16], &[rect], &models, |v| match v {
            Some(_) => RED,
            None => GREEN,
        });

        let greens = atlas.values_slice().iter().filter(|t| **t == GREEN).count();
        assert!(greens > 0);
    }

    #[test]
    fn bytes_are_row_major_rgba() {
        let extent = Extent2i::from_min_and_shape(PointN([0, 0]), PointN([2, 2]));
        let atlas = Array2::new(extent, vec![RED, GREEN, CLEAR, RED]).unwrap();

        let bytes = atlas_bytes(&atlas);

        assert_eq!(bytes.len(), 2 * 2 * 4);
        assert_eq!(&bytes[4..8], &GREEN);
        assert_eq!(&bytes[8..12], &CLEAR);
    }
}
