//! Core types, settings and snapshots for the PDR tracker

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::math::GRAVITY;

/// Named detection sensitivity tiers
///
/// Each tier maps to a threshold multiplier. The adaptive detector scales
/// its standard-deviation factor by the multiplier, the fixed-threshold
/// detector scales the margin of its base threshold above gravity.
///
/// # Example
/// ```
/// use pdr_tracker::Sensitivity;
///
/// let tier: Sensitivity = "medium".parse().unwrap();
/// assert_eq!(tier.multiplier(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    /// Multiplier 1.0
    #[default]
    Low,
    /// Multiplier 1.5
    Medium,
    /// Multiplier 2.0
    High,
}

impl Sensitivity {
    /// Threshold multiplier for this tier
    pub fn multiplier(self) -> f32 {
        match self {
            Sensitivity::Low => 1.0,
            Sensitivity::Medium => 1.5,
            Sensitivity::High => 2.0,
        }
    }
}

impl FromStr for Sensitivity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Sensitivity::Low),
            "medium" => Ok(Sensitivity::Medium),
            "high" => Ok(Sensitivity::High),
            _ => Err(ConfigError::UnknownSensitivity(s.to_string())),
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sensitivity::Low => "low",
            Sensitivity::Medium => "medium",
            Sensitivity::High => "high",
        };
        f.write_str(name)
    }
}

/// Step detection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    /// Rolling-window adaptive threshold with local-maximum peak detection
    #[default]
    Adaptive,
    /// Fixed threshold rising-edge detection, the low-cost fallback
    Threshold,
}

impl FromStr for DetectorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adaptive" => Ok(DetectorKind::Adaptive),
            "threshold" | "simple" => Ok(DetectorKind::Threshold),
            _ => Err(ConfigError::UnknownDetector(s.to_string())),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::Adaptive => f.write_str("adaptive"),
            DetectorKind::Threshold => f.write_str("threshold"),
        }
    }
}

/// Low-pass motion filter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    /// Whether the filter is applied at all
    ///
    /// When disabled the raw magnitude passes straight through.
    pub enabled: bool,
    /// Smoothing factor α in [0.1, 1.0]
    ///
    /// Smaller values smooth more and lag more. Values outside the range
    /// are clamped by the filter.
    pub alpha: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha: 0.3,
        }
    }
}

/// Step detector settings
///
/// # Example
/// ```
/// use core::time::Duration;
/// use pdr_tracker::{DetectorKind, DetectorSettings, Sensitivity};
///
/// let settings = DetectorSettings {
///     kind: DetectorKind::Adaptive,
///     base_threshold: 11.0,
///     sensitivity: Sensitivity::Medium,
///     min_peak_interval: Duration::from_millis(400),
///     prominence_rejection: true,
///     ..Default::default()
/// };
/// assert_eq!(settings.window_capacity, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    /// Detection strategy
    pub kind: DetectorKind,
    /// Threshold floor in m/s²
    ///
    /// The adaptive threshold never drops below this value, which keeps a
    /// stationary phone from triggering steps on sensor noise.
    pub base_threshold: f32,
    /// Threshold multiplier tier
    pub sensitivity: Sensitivity,
    /// Minimum time between two accepted steps
    pub min_peak_interval: Duration,
    /// Reject peaks whose prominence above the window minimum is too small
    pub prominence_rejection: bool,
    /// Sliding window size in samples
    pub window_capacity: usize,
    /// Samples required in the window before any step is reported
    pub warm_up_samples: usize,
    /// Threshold is recomputed once every this many samples
    pub recompute_interval: u64,
    /// Minimum rising slope (m/s² per sample) into a peak
    pub min_peak_slope: f32,
    /// Required prominence in standard deviations when rejection is enabled
    pub prominence_factor: f32,
}

impl DetectorSettings {
    /// Threshold used by the fixed-threshold strategy
    pub fn fixed_threshold(&self) -> f32 {
        GRAVITY + (self.base_threshold - GRAVITY) * self.sensitivity.multiplier()
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            kind: DetectorKind::default(),
            base_threshold: 10.5,
            sensitivity: Sensitivity::default(),
            min_peak_interval: Duration::from_millis(500),
            prominence_rejection: false,
            window_capacity: 10,
            warm_up_samples: 5,
            recompute_interval: 10,
            min_peak_slope: 0.25,
            prominence_factor: 1.5,
        }
    }
}

/// Complete tracker configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Motion filter settings
    pub filter: FilterSettings,
    /// Step detector settings
    pub detector: DetectorSettings,
    /// Distance covered by one step in meters
    pub step_length: f32,
    /// Fixed height of the tracked point above the floor in meters
    pub initial_height: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            filter: FilterSettings::default(),
            detector: DetectorSettings::default(),
            step_length: 0.65,
            initial_height: 1.6,
        }
    }
}

/// Tracked position in meters
///
/// `x` and `z` span the floor plane, `y` is the fixed height. Heading 0
/// faces the negative Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// Floor origin at the given height
    pub fn origin(height: f32) -> Self {
        Self {
            x: 0.0,
            y: height,
            z: 0.0,
        }
    }

    /// Distance from the floor origin, ignoring height
    pub fn planar_distance(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

/// A detected footfall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent {
    /// Tracker clock at detection
    pub timestamp: Duration,
}

/// Result of ingesting one acceleration sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Whether this sample completed a step
    pub stepped: bool,
    /// Position after the sample
    pub position: Position,
    /// Total steps since construction or the last reset
    pub step_count: u32,
    /// Heading used for the step, in radians
    pub heading: f32,
    /// The step event when `stepped` is true
    pub event: Option<StepEvent>,
}

/// Detector diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetectorStats {
    /// Steps accepted by this detector instance
    pub step_count: u32,
    /// Current detection threshold in m/s²
    pub threshold: f32,
    /// Standard deviation of the window at the last recompute
    pub std_dev: f32,
    /// Samples seen by this detector instance
    pub sample_count: u64,
}

/// Read-only tracker snapshot for diagnostics displays
///
/// # Example
/// ```
/// use pdr_tracker::StepTracker;
///
/// let tracker = StepTracker::new();
/// let stats = tracker.stats();
/// assert_eq!(stats.step_count, 0);
/// assert_eq!(stats.filtered_magnitude, 9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerStats {
    /// Steps since construction or the last reset
    pub step_count: u32,
    /// Current low-pass filtered acceleration magnitude
    pub filtered_magnitude: f32,
    /// Current detection threshold
    pub threshold: f32,
    /// Window standard deviation at the last recompute
    pub std_dev: f32,
    /// Acceleration samples seen since construction or the last reset
    pub sample_count: u64,
    /// Cached heading in radians
    pub heading: f32,
    /// Current position
    pub position: Position,
    /// Total distance walked in meters
    pub distance: f32,
    /// Active detection strategy
    pub detector: DetectorKind,
}

/// Platform sensor streams consumed by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Device orientation (alpha, beta, gamma)
    Orientation,
    /// Accelerometer including gravity
    Motion,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Orientation => f.write_str("orientation"),
            SensorKind::Motion => f.write_str("motion"),
        }
    }
}

/// Which sensor streams are currently delivering samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub orientation: bool,
    pub motion: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            orientation: true,
            motion: true,
        }
    }
}

/// One-time signal to the presentation layer that a sensor is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityNotice {
    /// The missing sensor
    pub sensor: SensorKind,
}

impl fmt::Display for CapabilityNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sensor {
            SensorKind::Orientation => {
                write!(f, "orientation sensor unavailable, heading is frozen")
            }
            SensorKind::Motion => write!(f, "motion sensor unavailable, no steps will be detected"),
        }
    }
}
