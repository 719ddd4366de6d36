//! Benchmarks for clothy simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use clothy::*;

fn cloth(mode: SimulationMode) -> ClothSimulation<f32> {
    let config = ClothConfig::new()
        .with_grid(25, 25, 4.0, 4.0)
        .with_mode(mode)
        .with_seed(1);
    ClothSimulation::new(config).unwrap()
}

fn bench_fixed_steps(c: &mut Criterion) {
    c.bench_function("cloth_25x25_tear_60_steps", |b| {
        b.iter(|| {
            let mut sim = cloth(SimulationMode::Tear);
            for _ in 0..60 {
                sim.step_fixed();
            }
            sim.positions()
        });
    });
}

fn bench_flag_frames(c: &mut Criterion) {
    c.bench_function("cloth_25x25_flag_60_frames", |b| {
        b.iter(|| {
            let mut sim = cloth(SimulationMode::Flag);
            for _ in 0..60 {
                sim.update(1.0 / 60.0);
            }
            sim.vertices().len()
        });
    });
}

fn bench_mesh_rebuild(c: &mut Criterion) {
    let mut grid: ClothGrid<f32> = ClothGrid::new(&GridConfig::new(50, 50, 4.0, 4.0)).unwrap();
    grid.tear_at(grid.position_at(25, 25), 0.5);
    let mut mesh = MeshBuffers::new();
    c.bench_function("mesh_50x50_rebuild", |b| {
        b.iter(|| {
            mesh.rebuild(&grid);
            mesh.indices().len()
        });
    });
}

criterion_group!(benches, bench_fixed_steps, bench_flag_frames, bench_mesh_rebuild);
criterion_main!(benches);
