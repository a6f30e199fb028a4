#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible
)]
#![warn(clippy::doc_markdown)]

//! Texture atlases for greedy-meshed voxel faces.
//!
//! Every `FaceRect` gets a tile of `width x height` texels (one per voxel it covers) plus a 1-texel border. `pack_atlas`
//! places the tiles in a square atlas, and `synthesize_atlas` paints them from the voxel grids.

mod pack;
mod synthesize;

pub use pack::*;
pub use synthesize::*;

pub use image;

use image::RgbaImage;

/// Converts the atlas into an image buffer, ready to be encoded.
pub fn encode_atlas(atlas: &AtlasImage) -> RgbaImage {
    RgbaImage::from(atlas)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use voxmesh_core::prelude::*;
    use voxmesh_storage::prelude::*;

    #[test]
    fn encoded_atlas_keeps_bytes_and_shape() {
        let extent = Extent2i::from_min_and_shape(PointN([0, 0]), PointN([3, 2]));
        let atlas = Array2::fill_with(extent, |p| [p.x() as u8, p.y() as u8, 7, 255]);

        let image = encode_atlas(&atlas);

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.into_raw(), atlas_bytes(&atlas));
    }
}
