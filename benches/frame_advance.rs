use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dreamfield::gesture::{Dispatcher, Gesture, HandSummary, Handedness, TrackingState};
use dreamfield::render::PointRasterizer;
use dreamfield::scene::{ObjectSpec, Simulator};
use dreamfield::SimulatorConfig;
use glam::Vec2;

const KINDS: [&str; 6] = ["cube", "sphere", "cone", "torus", "cylinder", "cloud"];

fn populated(objects: usize, points: usize) -> Simulator {
    let mut sim = Simulator::new(SimulatorConfig {
        lifetime_min: 1e6,
        lifetime_max: 1e6,
        ..SimulatorConfig::deterministic(17)
    });
    let specs: Vec<ObjectSpec> = (0..objects)
        .map(|i| {
            let x = (i % 10) as f32 * 2.0 - 9.0;
            let z = -((i / 10) as f32) * 3.0;
            ObjectSpec::new(format!("obj-{}", i), KINDS[i % KINDS.len()])
                .with_position([x, 1.0, z])
                .with_point_count(points)
        })
        .collect();
    sim.replace_objects(&specs);
    sim
}

/// Benchmark: simulation step only, across scene sizes
fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for objects in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::new("objects", objects), objects, |b, &objects| {
            let mut sim = populated(objects, 2000);
            b.iter(|| sim.advance(black_box(1.0 / 60.0)))
        });
    }
    group.finish();
}

/// Benchmark: CPU point splatting at viewer resolution
fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");

    for points in [500, 5000].iter() {
        group.bench_with_input(BenchmarkId::new("points_per_object", points), points, |b, &points| {
            let mut sim = populated(50, points);
            // Fully reveal before measuring
            for _ in 0..400 {
                sim.advance(1.0 / 60.0);
            }
            let mut raster = PointRasterizer::new(960, 540);
            b.iter(|| sim.render(&mut raster))
        });
    }
    group.finish();
}

/// Benchmark: gesture dispatch with picking over many objects
fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::with_default_actions();
    let mut sim = populated(500, 100);
    let mut tracking = TrackingState::default();
    let mut frame = 0u32;

    c.bench_function("dispatch_two_hands", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let wobble = (frame % 20) as f32 * 0.005;
            let hands = [
                HandSummary::synthetic(Handedness::Left, Gesture::Pinch, Vec2::new(0.4 - wobble, 0.5), 0.0),
                HandSummary::synthetic(Handedness::Right, Gesture::Pinch, Vec2::new(0.6 + wobble, 0.5), 0.0),
            ];
            black_box(dispatcher.process(&mut tracking, &hands, &mut sim))
        })
    });
}

criterion_group!(benches, bench_advance, bench_rasterize, bench_dispatch);
criterion_main!(benches);
