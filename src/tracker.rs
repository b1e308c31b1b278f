//! Pedestrian dead-reckoning tracker

use core::time::Duration;

use log::{debug, info, warn};
use nalgebra::Vector3;

use crate::detector::{StepDetection, StepDetector};
use crate::filter::MotionFilter;
use crate::integrator::DeadReckoning;
use crate::math::finite_or_zero;
use crate::options::TrackerOptions;
use crate::orientation::OrientationEstimator;
use crate::types::{
    Capabilities, CapabilityNotice, FilterSettings, Position, SensorKind, StepOutcome,
    TrackerSettings, TrackerStats,
};

/// One accelerometer reading including gravity, in m/s²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationSample {
    /// Acceleration vector in device coordinates
    pub acceleration: Vector3<f32>,
    /// Time since the previous motion sample
    pub dt: Duration,
}

impl AccelerationSample {
    /// Build a sample from a vector and a time delta in milliseconds
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn new(acceleration: Vector3<f32>, dt_ms: f32) -> Self {
        Self {
            acceleration,
            dt: Duration::try_from_secs_f32(dt_ms / 1000.0).unwrap_or_default(),
        }
    }

    /// Build a sample from possibly missing platform fields
    pub fn from_components(x: Option<f32>, y: Option<f32>, z: Option<f32>, dt_ms: f32) -> Self {
        Self::new(
            Vector3::new(finite_or_zero(x), finite_or_zero(y), finite_or_zero(z)),
            dt_ms,
        )
    }

    /// `sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f32 {
        self.acceleration.norm()
    }
}

/// Owned tracker combining heading, motion filter, step detector and
/// position integrator
///
/// Orientation and motion samples arrive independently. Orientation
/// updates only refresh the cached heading; a motion sample that completes
/// a step reads whatever heading is cached at that moment.
///
/// # Example
/// ```
/// use pdr_tracker::StepTracker;
///
/// let mut tracker = StepTracker::new();
/// tracker.ingest_orientation(Some(90.0), Some(0.0), Some(0.0));
///
/// let magnitudes = [9.8, 9.8, 9.8, 9.8, 9.8, 12.0, 16.0, 18.0, 16.0, 12.0, 9.8];
/// let mut stepped = false;
/// for magnitude in magnitudes {
///     let outcome = tracker.ingest_motion(Some(0.0), Some(0.0), Some(magnitude), 50.0);
///     stepped |= outcome.stepped;
/// }
///
/// assert!(stepped);
/// assert_eq!(tracker.stats().step_count, 1);
/// assert!((tracker.position().z + 0.65).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct StepTracker {
    settings: TrackerSettings,
    orientation: OrientationEstimator,
    filter: MotionFilter,
    detector: StepDetector,
    integrator: DeadReckoning,
    clock: Duration,
    sample_count: u64,
    capabilities: Capabilities,
    notified: Vec<SensorKind>,
}

impl StepTracker {
    /// Create a tracker with default settings
    pub fn new() -> Self {
        Self::with_settings(TrackerSettings::default())
    }

    /// Create a tracker with the given settings
    pub fn with_settings(settings: TrackerSettings) -> Self {
        let mut tracker = Self {
            settings,
            orientation: OrientationEstimator::new(),
            filter: MotionFilter::new(settings.filter),
            detector: StepDetector::new(settings.detector),
            integrator: DeadReckoning::new(settings.step_length, settings.initial_height),
            clock: Duration::ZERO,
            sample_count: 0,
            capabilities: Capabilities::default(),
            notified: Vec::new(),
        };
        tracker.settings = tracker.effective_settings(settings);
        tracker
    }

    /// Consume one orientation sample (degrees)
    ///
    /// The first sample with an `alpha` calibrates the reference heading.
    pub fn ingest_orientation(&mut self, alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) {
        self.capabilities.orientation = true;
        self.orientation.observe(alpha, beta, gamma);
    }

    /// Consume one accelerometer reading given as platform fields
    ///
    /// Missing components read as zero. `dt_ms` is the time since the
    /// previous motion sample.
    pub fn ingest_motion(
        &mut self,
        ax: Option<f32>,
        ay: Option<f32>,
        az: Option<f32>,
        dt_ms: f32,
    ) -> StepOutcome {
        self.ingest_acceleration(AccelerationSample::from_components(ax, ay, az, dt_ms))
    }

    /// Consume one accelerometer reading
    ///
    /// Filters the magnitude, runs the step detector and, when a step is
    /// accepted, advances the position along the cached heading.
    pub fn ingest_acceleration(&mut self, sample: AccelerationSample) -> StepOutcome {
        self.capabilities.motion = true;
        self.clock = self.clock.saturating_add(sample.dt);
        self.sample_count += 1;

        let filtered = self.filter.filter(sample.magnitude());
        let heading = self.orientation.heading();
        let event = self.detector.update(filtered, self.clock);

        if event.is_some() {
            let position = self.integrator.on_step(heading);
            debug!(
                "step {} at {:?}: heading={heading:.3} rad, position=({:.2}, {:.2})",
                self.integrator.step_count(),
                self.clock,
                position.x,
                position.z
            );
        }

        StepOutcome {
            stepped: event.is_some(),
            position: self.integrator.position(),
            step_count: self.integrator.step_count(),
            heading,
            event,
        }
    }

    /// Zero position, step count, detector history, filter, clock and the
    /// reference heading in one step
    pub fn reset(&mut self) {
        self.orientation.reset();
        self.filter.reset();
        self.detector.reset();
        self.integrator.reset();
        self.clock = Duration::ZERO;
        self.sample_count = 0;
        info!("tracker reset");
    }

    /// Apply a partial option set to subsequent samples
    pub fn configure(&mut self, options: &TrackerOptions) {
        let mut settings = self.settings;
        options.apply(&mut settings);
        self.set_settings(settings);
    }

    /// Replace all settings, keeping accumulated state
    pub fn set_settings(&mut self, settings: TrackerSettings) {
        if settings.detector.kind != self.detector.kind() {
            info!("switching step detector to {}", settings.detector.kind);
        }
        self.filter.set_settings(settings.filter);
        self.detector.set_settings(settings.detector);
        self.integrator.set_step_length(settings.step_length);
        self.integrator.set_initial_height(settings.initial_height);
        self.settings = self.effective_settings(settings);
        info!(
            "tracker configured: filter={} alpha={} sensitivity={} step_length={}",
            self.settings.filter.enabled,
            self.settings.filter.alpha,
            self.settings.detector.sensitivity,
            self.settings.step_length
        );
    }

    /// Current settings after clamping
    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    /// `settings` with the values the components actually clamped to
    fn effective_settings(&self, settings: TrackerSettings) -> TrackerSettings {
        TrackerSettings {
            filter: FilterSettings {
                enabled: settings.filter.enabled,
                alpha: self.filter.alpha(),
            },
            detector: self.detector.settings(),
            step_length: self.integrator.step_length(),
            ..settings
        }
    }

    /// Signal that a platform sensor is missing
    ///
    /// Returns a notice the first time each sensor is reported and `None`
    /// afterwards. The tracker keeps running on the remaining stream; a
    /// missing orientation sensor leaves the heading where it is.
    pub fn report_unavailable(&mut self, sensor: SensorKind) -> Option<CapabilityNotice> {
        match sensor {
            SensorKind::Orientation => self.capabilities.orientation = false,
            SensorKind::Motion => self.capabilities.motion = false,
        }
        if self.notified.contains(&sensor) {
            return None;
        }
        self.notified.push(sensor);
        let notice = CapabilityNotice { sensor };
        warn!("{notice}");
        Some(notice)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Diagnostic snapshot
    pub fn stats(&self) -> TrackerStats {
        let detector = self.detector.stats();
        TrackerStats {
            step_count: self.integrator.step_count(),
            filtered_magnitude: self.filter.value(),
            threshold: detector.threshold,
            std_dev: detector.std_dev,
            sample_count: self.sample_count,
            heading: self.orientation.heading(),
            position: self.integrator.position(),
            distance: self.integrator.distance(),
            detector: self.detector.kind(),
        }
    }

    pub fn position(&self) -> Position {
        self.integrator.position()
    }

    /// Cached heading in radians
    pub fn heading(&self) -> f32 {
        self.orientation.heading()
    }

    /// Tracker clock, the sum of all ingested motion deltas, saturating at
    /// `Duration::MAX`
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn orientation(&self) -> &OrientationEstimator {
        &self.orientation
    }
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}
