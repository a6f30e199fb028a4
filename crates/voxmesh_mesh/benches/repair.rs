use voxmesh_mesh::*;
use voxmesh_storage::{IsEmpty, MaterialVoxel};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn repair_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair_sphere");
    for size in [8, 16, 32].iter() {
        let mesh = sphere_mesh(*size);
        for detection in [TJunctionDetection::Exhaustive, TJunctionDetection::SpatialGrid].iter() {
            let repair = TopologyRepair {
                detection: *detection,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", detection), size),
                &mesh,
                |b, mesh| b.iter(|| repair.repair(mesh)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, repair_sphere);
criterion_main!(benches);

fn sphere_mesh(size: i32) -> PosNormTexMesh {
    let (voxels, _) = utilities::data_sets::sphere_array(size, Solid(true), Solid(false));
    let mut rects = extract_faces(&voxels, MergeMode::Boundary, 0);
    let mut x = 0;
    for rect in rects.iter_mut() {
        rect.placement = Some(AtlasPlacement { x, y: 0 });
        x += rect.width() as u32 + 2;
    }

    assemble_mesh(
        &rects,
        [x, size as u32 + 2],
        Shading::Flat,
        &MeshTransform::default(),
    )
}

#[derive(Clone, Copy)]
struct Solid(bool);

impl MaterialVoxel for Solid {
    type Material = u8;

    fn material(&self) -> Self::Material {
        1
    }
}

impl IsEmpty for Solid {
    fn is_empty(&self) -> bool {
        !self.0
    }
}
