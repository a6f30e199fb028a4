use voxmesh_core::prelude::*;
use voxmesh_mesh::*;
use voxmesh_storage::{prelude::*, IsEmpty, MaterialVoxel};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn greedy_faces_terrace(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_faces_terrace");
    for size in [8, 16, 32, 64].iter() {
        for mode in [MergeMode::Boundary, MergeMode::PerColor].iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                size,
                |b, &size| {
                    b.iter_with_setup(
                        || {
                            let extent =
                                Extent3i::from_min_and_shape(PointN([0; 3]), PointN([size; 3]));
                            let mut voxels = Array3::fill(extent, Color(0));
                            for i in 0..size {
                                let level = Extent3i::from_min_and_shape(
                                    PointN([i; 3]),
                                    PointN([size - i, 1, size - i]),
                                );
                                voxels.fill_extent(&level, Color(1 + (i % 3) as u8));
                            }

                            voxels
                        },
                        |voxels| extract_faces(&voxels, *mode, 0),
                    );
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, greedy_faces_terrace);
criterion_main!(benches);

#[derive(Clone, Copy)]
struct Color(u8);

impl MaterialVoxel for Color {
    type Material = u8;

    fn material(&self) -> Self::Material {
        self.0
    }
}

impl IsEmpty for Color {
    fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
