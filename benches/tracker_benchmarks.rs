use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::Vector3;
use pdr_tracker::{
    AccelerationSample, AdaptiveDetector, DetectorSettings, MotionFilter, StepDetection,
    StepTracker, TrackerOptions,
};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;
use std::time::Duration;

// Pre-generated walking data so the RNG stays out of the measured loop
struct PreGeneratedWalk {
    samples: Vec<AccelerationSample>,
    index: usize,
}

impl PreGeneratedWalk {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.02; // 50Hz sample rate

            // roughly two footfalls per second
            let gait = (time * 2.0 * 2.0 * PI).sin().max(0.0);

            let acceleration = Vector3::new(
                0.3 * gait + rng.random_range(-0.05..0.05),
                6.2 + 2.0 * gait + rng.random_range(-0.05..0.05),
                7.4 + 2.5 * gait + rng.random_range(-0.05..0.05),
            );

            samples.push(AccelerationSample::new(acceleration, 20.0));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> AccelerationSample {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

/// Benchmark one motion sample through the full tracker
fn bench_ingest_motion(c: &mut Criterion) {
    let mut tracker = StepTracker::new();
    let mut walk = PreGeneratedWalk::new(1_000, 42);

    c.bench_function("tracker_ingest_acceleration", |b| {
        b.iter(|| tracker.ingest_acceleration(black_box(walk.next())))
    });
}

/// Benchmark the platform-field entry point
fn bench_ingest_motion_fields(c: &mut Criterion) {
    let mut tracker = StepTracker::new();

    c.bench_function("tracker_ingest_motion", |b| {
        b.iter(|| {
            tracker.ingest_motion(
                black_box(Some(0.2)),
                black_box(Some(6.3)),
                black_box(Some(7.4)),
                black_box(20.0),
            )
        })
    });
}

/// Benchmark the fixed-threshold strategy
fn bench_ingest_motion_threshold(c: &mut Criterion) {
    let mut tracker = StepTracker::new();
    tracker.configure(&TrackerOptions::from_json(r#"{ "detector": "threshold" }"#).unwrap());
    let mut walk = PreGeneratedWalk::new(1_000, 42);

    c.bench_function("tracker_ingest_acceleration_threshold", |b| {
        b.iter(|| tracker.ingest_acceleration(black_box(walk.next())))
    });
}

/// Benchmark orientation updates
fn bench_ingest_orientation(c: &mut Criterion) {
    let mut tracker = StepTracker::new();
    let mut rng = Pcg64::seed_from_u64(7);
    let alphas: Vec<f32> = (0..1_000).map(|_| rng.random_range(0.0..360.0)).collect();
    let mut index = 0;

    c.bench_function("tracker_ingest_orientation", |b| {
        b.iter(|| {
            index = (index + 1) % alphas.len();
            tracker.ingest_orientation(black_box(Some(alphas[index])), Some(2.0), Some(-1.0))
        })
    });
}

/// Benchmark the adaptive detector alone, including threshold recomputes
fn bench_adaptive_detector(c: &mut Criterion) {
    let mut detector = AdaptiveDetector::new(DetectorSettings::default());
    let mut filter = MotionFilter::default();
    let mut walk = PreGeneratedWalk::new(1_000, 3);
    let mut clock = Duration::ZERO;

    c.bench_function("adaptive_detector_update", |b| {
        b.iter(|| {
            let sample = walk.next();
            clock += sample.dt;
            detector.update(black_box(filter.filter(sample.magnitude())), clock)
        })
    });
}

/// Benchmark a one-minute walk replayed in a batch
fn bench_batch_walk(c: &mut Criterion) {
    let walk = PreGeneratedWalk::new(3_000, 11);

    c.bench_function("tracker_batch_3000_samples", |b| {
        b.iter(|| {
            let mut tracker = StepTracker::new();
            for sample in &walk.samples {
                tracker.ingest_acceleration(black_box(*sample));
            }
            black_box(tracker.stats())
        })
    });
}

/// Benchmark the diagnostics snapshot
fn bench_stats(c: &mut Criterion) {
    let tracker = StepTracker::new();

    c.bench_function("tracker_stats", |b| b.iter(|| black_box(tracker.stats())));
}

criterion_group!(
    benches,
    bench_ingest_motion,
    bench_ingest_motion_fields,
    bench_ingest_motion_threshold,
    bench_ingest_orientation,
    bench_adaptive_detector,
    bench_batch_walk,
    bench_stats
);

criterion_main!(benches);
