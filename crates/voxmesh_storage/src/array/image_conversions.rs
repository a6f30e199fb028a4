use crate::{Array2, Local};

use voxmesh_core::prelude::*;

use image::{ImageBuffer, Rgba, RgbaImage};

impl From<&Array2<[u8; 4]>> for RgbaImage {
    fn from(array: &Array2<[u8; 4]>) -> Self {
        let shape = array.extent().shape;

        ImageBuffer::from_fn(shape.x() as u32, shape.y() as u32, |x, y| {
            let stride = array.stride_from_local_point(Local(PointN([x as i32, y as i32])));

            Rgba(array[stride])
        })
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
