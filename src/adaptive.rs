//! Adaptive-threshold step detection

use core::time::Duration;

use log::{debug, trace};

use crate::detector::StepDetection;
use crate::math::GRAVITY;
use crate::types::{DetectorSettings, DetectorStats, StepEvent};
use crate::window::MagnitudeWindow;

/// Peak detector with a threshold that follows the user's gait intensity
///
/// Every sample is pushed into a bounded window. Once every
/// `recompute_interval` samples the threshold becomes
/// `max(base_threshold, mean + multiplier·stddev)`. A step is accepted when
/// the magnitude is above the threshold just after a local maximum whose
/// rising slope exceeds `min_peak_slope`, and enough time has passed since
/// the previous step, strictly more than `min_peak_interval`. Nothing is reported until the window holds
/// `warm_up_samples` values.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use pdr_tracker::{AdaptiveDetector, DetectorSettings, StepDetection};
///
/// let mut detector = AdaptiveDetector::new(DetectorSettings::default());
/// let trace = [9.8, 9.8, 9.8, 9.8, 10.5, 12.0, 13.0, 12.5, 11.0];
///
/// let mut steps = 0;
/// for (i, magnitude) in trace.iter().enumerate() {
///     let timestamp = Duration::from_millis(100 * i as u64);
///     if detector.update(*magnitude, timestamp).is_some() {
///         steps += 1;
///     }
/// }
/// assert_eq!(steps, 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveDetector {
    settings: DetectorSettings,
    window: MagnitudeWindow,
    threshold: f32,
    std_dev: f32,
    previous_magnitude: f32,
    previous_delta: f32,
    last_step: Option<Duration>,
    sample_count: u64,
    step_count: u32,
}

impl AdaptiveDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self {
            settings,
            window: MagnitudeWindow::new(settings.window_capacity),
            threshold: settings.base_threshold,
            std_dev: 0.0,
            previous_magnitude: GRAVITY,
            previous_delta: 0.0,
            last_step: None,
            sample_count: 0,
            step_count: 0,
        }
    }

    /// Apply new settings, keeping the window and derivative history
    ///
    /// The threshold is raised to the new floor right away; the next
    /// periodic recompute picks up the new multiplier.
    pub fn set_settings(&mut self, settings: DetectorSettings) {
        self.settings = settings;
        self.window.set_capacity(settings.window_capacity);
        self.threshold = self.threshold.max(settings.base_threshold);
    }

    pub fn settings(&self) -> DetectorSettings {
        self.settings
    }

    /// The sliding window of filtered magnitudes
    pub fn window(&self) -> &MagnitudeWindow {
        &self.window
    }

    fn recompute_threshold(&mut self) {
        let mean = self.window.mean();
        self.std_dev = self.window.std_dev();
        let adaptive = mean + self.settings.sensitivity.multiplier() * self.std_dev;
        self.threshold = self.settings.base_threshold.max(adaptive);
        trace!(
            "threshold recomputed: mean={mean:.3} std_dev={:.3} threshold={:.3}",
            self.std_dev, self.threshold
        );
    }

    fn is_candidate(&self, magnitude: f32, delta: f32) -> bool {
        magnitude > self.threshold
            && self.previous_delta > 0.0
            && delta < 0.0
            && self.previous_delta.abs() > self.settings.min_peak_slope
    }

    fn debounced(&self, timestamp: Duration) -> bool {
        match self.last_step {
            Some(last) => timestamp.saturating_sub(last) > self.settings.min_peak_interval,
            None => true,
        }
    }

    fn is_prominent(&self, magnitude: f32) -> bool {
        if !self.settings.prominence_rejection {
            return true;
        }
        let floor = self.window.min().unwrap_or(magnitude);
        magnitude - floor > self.settings.prominence_factor * self.std_dev
    }
}

impl StepDetection for AdaptiveDetector {
    fn update(&mut self, magnitude: f32, timestamp: Duration) -> Option<StepEvent> {
        self.window.push(magnitude);
        self.sample_count += 1;

        let cadence = self.settings.recompute_interval.max(1);
        if self.sample_count % cadence == 0 {
            self.recompute_threshold();
        }

        let delta = magnitude - self.previous_magnitude;

        let accepted = self.window.len() >= self.settings.warm_up_samples
            && self.is_candidate(magnitude, delta)
            && self.debounced(timestamp)
            && self.is_prominent(magnitude);

        // the derivative stream stays continuous whether or not a step fired
        self.previous_magnitude = magnitude;
        self.previous_delta = delta;

        if !accepted {
            return None;
        }

        self.step_count += 1;
        self.last_step = Some(timestamp);
        debug!(
            "adaptive step {} at {:?}: magnitude={magnitude:.3} threshold={:.3}",
            self.step_count, timestamp, self.threshold
        );
        Some(StepEvent { timestamp })
    }

    fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    fn stats(&self) -> DetectorStats {
        DetectorStats {
            step_count: self.step_count,
            threshold: self.threshold,
            std_dev: self.std_dev,
            sample_count: self.sample_count,
        }
    }
}
