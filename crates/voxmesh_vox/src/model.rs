use voxmesh_core::prelude::*;
use voxmesh_storage::{prelude::*, IsEmpty, MaterialVoxel};

/// One entry of an `XYZI` chunk.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Voxel {
    pub position: Point3i,
    pub color_index: u8,
}

/// A single voxel model: the sparse voxel list as stored in the file, plus a dense occupancy grid for constant-time
/// neighbor queries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoxModel {
    /// The declared `SIZE` of the model.
    pub size: Point3i,
    pub voxels: Vec<Voxel>,
    /// Each cell is either `None` or the index of the voxel at that point in `voxels`.
    pub grid: Array3<Option<u32>>,
    /// The tightest box around all filled voxels. Empty if there are no voxels in the grid.
    pub bounds: Extent3i,
}

/// The largest model edge the format allows.
pub(crate) const MAX_MODEL_SIZE: i32 = 256;

impl VoxModel {
    /// Builds the dense grid for `voxels` inside a `size` box, clamped to `[0, 256]` on each axis. Voxels outside of the box
    /// are dropped. When two voxels land on the same point, the later one wins.
    pub fn new(size: Point3i, voxels: Vec<Voxel>) -> Self {
        let size = size
            .join(&Point3i::ZERO)
            .meet(&Point3i::fill(MAX_MODEL_SIZE));
        let extent = Extent3i::from_min_and_shape(Point3i::ZERO, size);
        let mut grid = Array3::fill(extent, None);

        let mut bounds = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::ZERO);
        let mut num_dropped = 0;
        for (i, voxel) in voxels.iter().enumerate() {
            match grid.get_mut(voxel.position) {
                Some(cell) => {
                    *cell = Some(i as u32);
                    bounds = bounds.union(&Extent3i::from_min_and_shape(
                        voxel.position,
                        Point3i::ONES,
                    ));
                }
                None => num_dropped += 1,
            }
        }
        if num_dropped > 0 {
            tracing::warn!(
                "Dropped {} voxels outside of model size {:?}",
                num_dropped,
                size
            );
        }

        Self {
            size,
            voxels,
            grid,
            bounds,
        }
    }

    /// The grid extent, `[0, size)`.
    pub fn extent(&self) -> &Extent3i {
        self.grid.extent()
    }

    /// The color index at `p`, or 0 if `p` is empty or outside of the grid.
    pub fn color_index(&self, p: Point3i) -> u8 {
        match self.grid.get(p) {
            Some(Some(i)) => self.voxels[*i as usize].color_index,
            _ => 0,
        }
    }

    /// A dense view of the model's colors.
    pub fn color_array(&self) -> Array3<VoxColor> {
        self.grid.map(|cell| match cell {
            Some(i) => VoxColor::Color(self.voxels[*i as usize].color_index),
            None => VoxColor::Empty,
        })
    }
}

/// The content of one `.vox` grid cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VoxColor {
    Color(u8),
    Empty,
}

impl VoxColor {
    /// The palette color index, or 0 when empty.
    pub fn index(&self) -> u8 {
        match self {
            VoxColor::Color(i) => *i,
            VoxColor::Empty => 0,
        }
    }
}

impl Default for VoxColor {
    fn default() -> Self {
        VoxColor::Empty
    }
}

impl IsEmpty for VoxColor {
    fn is_empty(&self) -> bool {
        matches!(self, VoxColor::Empty)
    }
}

impl MaterialVoxel for VoxColor {
    type Material = u8;

    fn material(&self) -> Self::Material {
        self.index()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
