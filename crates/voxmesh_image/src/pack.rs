use voxmesh_core::int_math::{ceil_sqrt, round_up_multiple_of_pow2};
use voxmesh_mesh::{AtlasPlacement, FaceRect};

use std::cmp::Reverse;

/// Every tile is surrounded by a border of this many pixels, filled by edge bleeding.
pub const TILE_BORDER: u32 = 1;

/// Granularity of `AtlasSizing::Tight`.
pub const TIGHT_ATLAS_STEP: u32 = 16;

/// The sequence of square atlas sizes tried while packing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AtlasSizing {
    /// Powers of two, doubling on failure.
    PowerOfTwo,
    /// Multiples of 16, growing by 16 on failure.
    Tight,
}

impl Default for AtlasSizing {
    fn default() -> Self {
        AtlasSizing::PowerOfTwo
    }
}

impl AtlasSizing {
    /// The first size worth trying: no smaller square has enough area for all of the bordered tiles.
    pub fn initial_size(&self, rects: &[FaceRect]) -> u32 {
        let total_area: u64 = rects
            .iter()
            .map(|r| {
                let [w, h] = bordered_shape(r);
                w as u64 * h as u64
            })
            .sum();
        let side = (ceil_sqrt(total_area) as u32).max(1);

        match self {
            AtlasSizing::PowerOfTwo => side.next_power_of_two(),
            AtlasSizing::Tight => round_up_multiple_of_pow2(side, TIGHT_ATLAS_STEP),
        }
    }

    pub fn grow(&self, size: u32) -> u32 {
        match self {
            AtlasSizing::PowerOfTwo => size.saturating_mul(2),
            AtlasSizing::Tight => size.saturating_add(TIGHT_ATLAS_STEP),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AtlasError {
    #[error("{num_faces} faces do not fit in an atlas of at most {max_size}x{max_size} pixels")]
    Exhausted { max_size: u32, num_faces: usize },
}

/// The shape of the tile for `rect`, including the border on both sides.
pub fn bordered_shape(rect: &FaceRect) -> [u32; 2] {
    [
        rect.width() as u32 + 2 * TILE_BORDER,
        rect.height() as u32 + 2 * TILE_BORDER,
    ]
}

/// Shelf-packs the bordered tiles of `rects` into a square atlas of side `atlas_size`, setting each rect's `placement`.
///
/// Tiles are visited tallest first (then widest first), left to right, starting a new shelf below the tallest tile of the
/// current one when a tile doesn't fit in the remaining width. The order of `rects` is unchanged.
///
/// Returns `false` as soon as some tile doesn't fit. If packing fails for some size, it also fails for every smaller size.
pub fn pack_rects(atlas_size: u32, rects: &mut [FaceRect]) -> bool {
    for rect in rects.iter_mut() {
        rect.placement = None;
    }

    let mut order: Vec<usize> = (0..rects.len()).collect();
    // Stable, so ties keep extraction order.
    order.sort_by_key(|&i| {
        let [w, h] = bordered_shape(&rects[i]);
        Reverse((h, w))
    });

    let mut x = 0;
    let mut y = 0;
    let mut shelf_height = 0;
    for i in order {
        let [w, h] = bordered_shape(&rects[i]);
        if w > atlas_size {
            return false;
        }
        if x + w > atlas_size {
            y += shelf_height;
            x = 0;
            shelf_height = 0;
        }
        if y + h > atlas_size {
            return false;
        }

        rects[i].placement = Some(AtlasPlacement { x, y });
        x += w;
        shelf_height = shelf_height.max(h);
    }

    true
}

/// Packs `rects` into the smallest atlas from the `sizing` sequence that fits them, never exceeding `max_size`. Returns
/// the side length of the (square) atlas.
pub fn pack_atlas(
    rects: &mut [FaceRect],
    sizing: AtlasSizing,
    max_size: u32,
) -> Result<u32, AtlasError> {
    let _span = tracing::info_span!("pack_atlas", num_faces = rects.len()).entered();

    let mut size = sizing.initial_size(rects).min(max_size);
    loop {
        if pack_rects(size, rects) {
            tracing::debug!("Packed {} faces into a {}x{} atlas", rects.len(), size, size);

            return Ok(size);
        }
        if size >= max_size {
            return Err(AtlasError::Exhausted {
                max_size,
                num_faces: rects.len(),
            });
        }
        tracing::trace!("{} faces don't fit in {}x{}", rects.len(), size, size);
        size = sizing.grow(size).min(max_size);
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
