//! Fixed-threshold rising-edge step detection

use core::time::Duration;

use log::debug;

use crate::detector::StepDetection;
use crate::math::GRAVITY;
use crate::types::{DetectorSettings, DetectorStats, StepEvent};

/// Low-cost detector: a step is the magnitude crossing a fixed threshold
/// from below, debounced by the minimum peak interval
///
/// The threshold is [`DetectorSettings::fixed_threshold`]. There is no
/// warm-up and no window, so it reacts from the first sample but does not
/// adapt to gait intensity.
#[derive(Debug, Clone)]
pub struct ThresholdDetector {
    settings: DetectorSettings,
    threshold: f32,
    previous_magnitude: f32,
    last_step: Option<Duration>,
    sample_count: u64,
    step_count: u32,
}

impl ThresholdDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self {
            settings,
            threshold: settings.fixed_threshold(),
            previous_magnitude: GRAVITY,
            last_step: None,
            sample_count: 0,
            step_count: 0,
        }
    }

    pub fn set_settings(&mut self, settings: DetectorSettings) {
        self.settings = settings;
        self.threshold = settings.fixed_threshold();
    }

    pub fn settings(&self) -> DetectorSettings {
        self.settings
    }
}

impl StepDetection for ThresholdDetector {
    fn update(&mut self, magnitude: f32, timestamp: Duration) -> Option<StepEvent> {
        self.sample_count += 1;

        let rising_edge = self.previous_magnitude <= self.threshold && magnitude > self.threshold;
        self.previous_magnitude = magnitude;

        if !rising_edge {
            return None;
        }
        if let Some(last) = self.last_step {
            if timestamp.saturating_sub(last) <= self.settings.min_peak_interval {
                return None;
            }
        }

        self.step_count += 1;
        self.last_step = Some(timestamp);
        debug!("threshold step {} at {:?}: magnitude={magnitude:.3}", self.step_count, timestamp);
        Some(StepEvent { timestamp })
    }

    fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    fn stats(&self) -> DetectorStats {
        DetectorStats {
            step_count: self.step_count,
            threshold: self.threshold,
            std_dev: 0.0,
            sample_count: self.sample_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sensitivity;

    fn feed(detector: &mut ThresholdDetector, trace: &[(f32, u64)]) -> u32 {
        trace
            .iter()
            .filter(|(m, t)| detector.update(*m, Duration::from_millis(*t)).is_some())
            .count() as u32
    }

    #[test]
    fn test_rising_edge_counts_once() {
        let mut detector = ThresholdDetector::new(DetectorSettings::default());
        // stays above the threshold for three samples
        let trace = [(9.8, 0), (11.0, 100), (12.0, 200), (11.5, 300), (9.8, 400)];
        assert_eq!(feed(&mut detector, &trace), 1);
    }

    #[test]
    fn test_reacts_without_warm_up() {
        let mut detector = ThresholdDetector::new(DetectorSettings::default());
        assert!(detector.update(12.0, Duration::ZERO).is_some());
    }

    #[test]
    fn test_debounce() {
        let mut detector = ThresholdDetector::new(DetectorSettings::default());
        let trace = [
            (12.0, 0),
            (9.8, 100),
            (12.0, 200),
            (9.8, 300),
            (12.0, 600),
            (9.8, 700),
        ];
        // crossings at 0, 200 and 600 ms; only 0 and 600 are far enough apart
        assert_eq!(feed(&mut detector, &trace), 2);
    }

    #[test]
    fn test_crossing_exactly_one_interval_later_is_rejected() {
        let mut detector = ThresholdDetector::new(DetectorSettings::default());
        let trace = [(9.8, 0), (12.0, 100), (9.8, 200), (9.8, 500), (12.0, 600), (9.8, 700)];
        assert_eq!(feed(&mut detector, &trace), 1);
    }

    #[test]
    fn test_sensitivity_raises_threshold() {
        let settings = DetectorSettings {
            sensitivity: Sensitivity::High,
            ..Default::default()
        };
        let mut detector = ThresholdDetector::new(settings);
        assert!((detector.stats().threshold - 11.2).abs() < 1e-5);
        assert!(detector.update(11.0, Duration::ZERO).is_none());
        assert!(detector.update(9.8, Duration::from_millis(100)).is_none());
        assert!(detector.update(11.5, Duration::from_millis(200)).is_some());
    }

    #[test]
    fn test_reset() {
        let mut detector = ThresholdDetector::new(DetectorSettings::default());
        detector.update(12.0, Duration::ZERO);
        detector.reset();
        let stats = detector.stats();
        assert_eq!(stats.step_count, 0);
        assert_eq!(stats.sample_count, 0);
        // fresh state: an immediate crossing is accepted again
        assert!(detector.update(12.0, Duration::from_millis(10)).is_some());
    }
}
