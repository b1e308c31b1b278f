//! PDR Tracker - pedestrian dead reckoning from phone inertial sensors
//!
//! Estimates a walker's 2D position indoors from the accelerometer and the
//! device orientation alone, without any positioning infrastructure.
//! Acceleration magnitudes are low-pass filtered and fed to a step
//! detector; every accepted step moves the position one stride along the
//! heading calibrated from the first compass fix.
//!
//! # Features
//!
//! - Heading relative to the first orientation fix, captured once per session
//! - Single-pole low-pass filter on the acceleration magnitude
//! - Adaptive step detection with a rolling mean/deviation threshold, slope
//!   and debounce checks, and optional prominence rejection
//! - Fixed-threshold rising-edge detection as a low-cost alternative
//! - Forgiving inputs: missing fields read as zero, options are clamped
//!
//! # Quick Start
//!
//! ```rust
//! use pdr_tracker::{StepTracker, TrackerOptions};
//!
//! let mut tracker = StepTracker::new();
//! tracker.configure(&TrackerOptions {
//!     step_length: Some(0.7),
//!     ..Default::default()
//! });
//!
//! // orientation bridge: alpha, beta, gamma in degrees
//! tracker.ingest_orientation(Some(12.0), Some(3.0), Some(-1.0));
//!
//! // accelerometer bridge: x, y, z in m/s² and the time since the last sample
//! let outcome = tracker.ingest_motion(Some(0.1), Some(0.2), Some(9.8), 20.0);
//! if outcome.stepped {
//!     println!("step {} at ({:.2}, {:.2})", outcome.step_count, outcome.position.x, outcome.position.z);
//! }
//!
//! let stats = tracker.stats();
//! println!("threshold {:.2}, filtered {:.2}", stats.threshold, stats.filtered_magnitude);
//! ```

mod adaptive;
mod detector;
mod error;
mod filter;
mod integrator;
mod math;
mod options;
mod orientation;
mod threshold;
mod tracker;
mod types;
mod window;

pub use adaptive::AdaptiveDetector;
pub use detector::{StepDetection, StepDetector};
pub use error::ConfigError;
pub use filter::{MAX_ALPHA, MIN_ALPHA, MotionFilter};
pub use integrator::{DeadReckoning, MIN_STEP_LENGTH};
pub use math::{DEG_TO_RAD, GRAVITY, RAD_TO_DEG, wrap_degrees, wrap_radians};
pub use options::TrackerOptions;
pub use orientation::{OrientationEstimator, OrientationSample};
pub use threshold::ThresholdDetector;
pub use tracker::{AccelerationSample, StepTracker};
pub use types::*;
pub use window::MagnitudeWindow;
