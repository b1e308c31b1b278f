use pdr_tracker::{StepTracker, TrackerOptions};

const SAMPLE_PERIOD_MS: f32 = 50.0; // 20 Hz accelerometer

fn main() {
    let mut tracker = StepTracker::new();
    tracker.configure(&TrackerOptions {
        step_length: Some(0.7),
        ..Default::default()
    });

    // first compass fix becomes the forward direction
    tracker.ingest_orientation(Some(180.0), Some(0.0), Some(0.0));

    for i in 0..60 {
        // this loop should repeat each time new accelerometer data is available
        // replace with actual readings in m/s², gravity included
        let bounce = if i % 16 < 8 { 4.0 * (i % 16) as f32 / 8.0 } else { 0.0 };
        let outcome = tracker.ingest_motion(Some(0.0), Some(0.0), Some(9.8 + bounce), SAMPLE_PERIOD_MS);

        if outcome.stepped {
            println!(
                "Step {}: x={:.2} m, z={:.2} m, heading={:.1}°",
                outcome.step_count,
                outcome.position.x,
                outcome.position.z,
                outcome.heading.to_degrees()
            );
        }
    }

    let stats = tracker.stats();
    println!(
        "{} steps, {:.2} m walked, threshold {:.2} m/s²",
        stats.step_count, stats.distance, stats.threshold
    );
}
