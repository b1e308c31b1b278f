use log::info;
use pdr_tracker::{StepTracker, TrackerOptions};
use serde::Deserialize;
use std::env;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct WalkSample {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Accelerometer X (m/s^2)")]
    accel_x: Option<f32>,
    #[serde(rename = "Accelerometer Y (m/s^2)")]
    accel_y: Option<f32>,
    #[serde(rename = "Accelerometer Z (m/s^2)")]
    accel_z: Option<f32>,
    #[serde(rename = "Alpha (deg)")]
    alpha: Option<f32>,
}

/// Replay a recorded walk through the tracker
///
/// Usage: `cargo run --example replay -- [trace.csv] [options.json]`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "testdata/walk_trace.csv".to_string());

    let mut tracker = StepTracker::new();
    if let Some(options_path) = args.next() {
        let options = TrackerOptions::from_json(&std::fs::read_to_string(options_path)?)?;
        tracker.configure(&options);
    }

    let mut reader = csv::Reader::from_path(&path)?;
    let mut samples = Vec::new();
    for result in reader.deserialize() {
        let record: WalkSample = result?;
        samples.push(record);
    }
    info!("replaying {} samples from {path}", samples.len());

    let mut previous_time = 0.0;
    for sample in &samples {
        if sample.alpha.is_some() {
            tracker.ingest_orientation(sample.alpha, None, None);
        }

        let delta_ms = (sample.time - previous_time) * 1000.0;
        previous_time = sample.time;

        let outcome = tracker.ingest_motion(sample.accel_x, sample.accel_y, sample.accel_z, delta_ms);
        if outcome.stepped {
            println!(
                "{:7.2}s  step {:3}  heading {:7.1}°  x {:6.2}  z {:6.2}",
                sample.time,
                outcome.step_count,
                outcome.heading.to_degrees(),
                outcome.position.x,
                outcome.position.z
            );
        }
    }

    let stats = tracker.stats();
    println!();
    println!("Detector:    {}", stats.detector);
    println!("Steps:       {}", stats.step_count);
    println!("Distance:    {:.2} m", stats.distance);
    println!("Final:       ({:.2}, {:.2})", stats.position.x, stats.position.z);
    println!("From start:  {:.2} m", stats.position.planar_distance());
    println!("Threshold:   {:.2} m/s² (σ {:.2})", stats.threshold, stats.std_dev);

    Ok(())
}
