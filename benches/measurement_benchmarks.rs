//! Benchmarks for the per-frame measurement path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shoulder_goniometer::{
    constants::{DEFAULT_MODEL_INPUT_SIZE, LANDMARK_STRIDE, NUM_MODEL_LANDMARKS},
    geometry::{calculate_angle, Point2D},
    landmarks::{Joint, Landmark, LandmarkSet, Side},
    measurement::MeasurementKind,
    pose_detection::decode_landmarks,
    session::SessionTracker,
};

/// Both arms visible, right arm slightly raised
fn test_landmarks() -> LandmarkSet {
    let mut set = LandmarkSet::empty();
    for (side, dx) in [(Side::Left, 0.1), (Side::Right, -0.1)] {
        set = set
            .with(side.landmark(Joint::Shoulder), Landmark::new(0.5 + dx, 0.4, 0.95))
            .with(side.landmark(Joint::Elbow), Landmark::new(0.5 + 2.0 * dx, 0.45, 0.9))
            .with(side.landmark(Joint::Wrist), Landmark::new(0.5 + 3.0 * dx, 0.4, 0.85))
            .with(side.landmark(Joint::Hip), Landmark::new(0.5 + dx, 0.8, 0.9));
    }
    set
}

/// Smooth arm swing between -30 and 150 degrees
fn generate_angle_sequence(num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| 60.0 + 90.0 * (i as f64 * 0.05).sin())
        .collect()
}

fn benchmark_calculate_angle(c: &mut Criterion) {
    let a = Point2D::new(0.62, 0.31);
    let b = Point2D::new(0.55, 0.42);
    let c_point = Point2D::new(0.54, 0.81);

    let mut group = c.benchmark_group("calculate_angle");
    for mirror in [false, true] {
        group.bench_with_input(BenchmarkId::from_parameter(mirror), &mirror, |bench, &mirror| {
            bench.iter(|| calculate_angle(black_box(a), black_box(b), black_box(c_point), mirror));
        });
    }
    group.finish();
}

fn benchmark_measure(c: &mut Criterion) {
    let landmarks = test_landmarks();

    let mut group = c.benchmark_group("measure");
    for kind in MeasurementKind::ALL {
        group.bench_function(kind.display_name(), |b| {
            b.iter(|| kind.measure(black_box(&landmarks), Side::Right, 0.5));
        });
    }
    group.finish();
}

fn benchmark_session_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_tracker");

    for num_samples in [30, 300, 3000] {
        let angles = generate_angle_sequence(num_samples);
        group.bench_with_input(BenchmarkId::from_parameter(num_samples), &angles, |b, angles| {
            b.iter(|| {
                let mut tracker = SessionTracker::new();
                for &angle in angles {
                    black_box(tracker.update(black_box(angle)));
                }
                tracker.state()
            });
        });
    }

    group.finish();
}

fn benchmark_decode_landmarks(c: &mut Criterion) {
    let raw: Vec<f32> = (0..NUM_MODEL_LANDMARKS * LANDMARK_STRIDE)
        .map(|i| (i % 256) as f32)
        .collect();
    let size = DEFAULT_MODEL_INPUT_SIZE;

    c.bench_function("decode_landmarks", |b| {
        b.iter(|| decode_landmarks(black_box(&raw), size, size));
    });
}

criterion_group!(
    benches,
    benchmark_calculate_angle,
    benchmark_measure,
    benchmark_session_tracker,
    benchmark_decode_landmarks
);
criterion_main!(benches);
