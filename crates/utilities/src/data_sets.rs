use voxmesh_core::prelude::*;
use voxmesh_storage::Array3;

/// A ball of `inner_value` centered on the origin, padded by one voxel of `outer_value`. Also returns the ball's radius.
pub fn sphere_array<T>(array_edge_length: i32, inner_value: T, outer_value: T) -> (Array3<T>, i32)
where
    T: Copy,
{
    let array_radius = array_edge_length / 2;
    let sphere_radius = array_radius - 1;
    let array_extent = Extent3i::from_min_and_shape(
        Point3i::fill(-array_radius),
        Point3i::fill(array_edge_length),
    );

    let map = Array3::fill_with(array_extent, |p| {
        if p.norm() < sphere_radius as f32 {
            inner_value
        } else {
            outer_value
        }
    });

    (map, sphere_radius)
}

/// A `shape` box at the origin where every voxel in `filled` gets `inner_value`.
pub fn box_array<T>(shape: Point3i, filled: Extent3i, inner_value: T, outer_value: T) -> Array3<T>
where
    T: Copy,
{
    let extent = Extent3i::from_min_and_shape(Point3i::ZERO, shape);

    Array3::fill_with(extent, |p| {
        if filled.contains(p) {
            inner_value
        } else {
            outer_value
        }
    })
}

/// A staircase of `size` levels, each one voxel tall, shrinking toward the top.
pub fn terrace_array<T>(size: i32, inner_value: T, outer_value: T) -> Array3<T>
where
    T: Copy,
{
    let extent = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(size));
    let mut map = Array3::fill(extent, outer_value);
    for i in 0..size {
        let level = Extent3i::from_min_and_shape(PointN([i; 3]), PointN([size - i, 1, size - i]));
        map.fill_extent(&level, inner_value);
    }

    map
}
