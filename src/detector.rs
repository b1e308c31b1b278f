//! Step detection contract and strategy selection

use core::time::Duration;

use log::warn;

use crate::adaptive::AdaptiveDetector;
use crate::threshold::ThresholdDetector;
use crate::types::{DetectorKind, DetectorSettings, DetectorStats, StepEvent};

/// Turns a stream of filtered acceleration magnitudes into step events
pub trait StepDetection {
    /// Feed one filtered magnitude observed at `timestamp`
    ///
    /// Returns the step event when this sample completes a footfall.
    fn update(&mut self, magnitude: f32, timestamp: Duration) -> Option<StepEvent>;

    /// Drop all history and counters, keeping the settings
    fn reset(&mut self);

    /// Diagnostic snapshot
    fn stats(&self) -> DetectorStats;
}

/// The selected detection strategy
///
/// Callers choose robustness (`Adaptive`) or cost (`Threshold`) through
/// [`DetectorSettings::kind`]; both produce the same [`StepEvent`]s.
#[derive(Debug, Clone)]
pub enum StepDetector {
    Adaptive(AdaptiveDetector),
    Threshold(ThresholdDetector),
}

impl StepDetector {
    /// Build the strategy named by `settings.kind`
    ///
    /// Non-finite thresholds, slopes and factors fall back to their defaults.
    pub fn new(settings: DetectorSettings) -> Self {
        let settings = sanitize(settings);
        match settings.kind {
            DetectorKind::Adaptive => StepDetector::Adaptive(AdaptiveDetector::new(settings)),
            DetectorKind::Threshold => StepDetector::Threshold(ThresholdDetector::new(settings)),
        }
    }

    pub fn kind(&self) -> DetectorKind {
        match self {
            StepDetector::Adaptive(_) => DetectorKind::Adaptive,
            StepDetector::Threshold(_) => DetectorKind::Threshold,
        }
    }

    pub fn settings(&self) -> DetectorSettings {
        match self {
            StepDetector::Adaptive(detector) => detector.settings(),
            StepDetector::Threshold(detector) => detector.settings(),
        }
    }

    /// Apply new settings
    ///
    /// Switching strategy starts the new detector from a clean state; staying
    /// on the same strategy keeps its history.
    pub fn set_settings(&mut self, settings: DetectorSettings) {
        let settings = sanitize(settings);
        if settings.kind != self.kind() {
            *self = StepDetector::new(settings);
            return;
        }
        match self {
            StepDetector::Adaptive(detector) => detector.set_settings(settings),
            StepDetector::Threshold(detector) => detector.set_settings(settings),
        }
    }
}

impl StepDetection for StepDetector {
    fn update(&mut self, magnitude: f32, timestamp: Duration) -> Option<StepEvent> {
        match self {
            StepDetector::Adaptive(detector) => detector.update(magnitude, timestamp),
            StepDetector::Threshold(detector) => detector.update(magnitude, timestamp),
        }
    }

    fn reset(&mut self) {
        match self {
            StepDetector::Adaptive(detector) => detector.reset(),
            StepDetector::Threshold(detector) => detector.reset(),
        }
    }

    fn stats(&self) -> DetectorStats {
        match self {
            StepDetector::Adaptive(detector) => detector.stats(),
            StepDetector::Threshold(detector) => detector.stats(),
        }
    }
}

/// Replace non-finite numeric settings with their defaults
fn sanitize(settings: DetectorSettings) -> DetectorSettings {
    let defaults = DetectorSettings::default();
    let finite_or = |name: &str, value: f32, fallback: f32| {
        if value.is_finite() {
            value
        } else {
            warn!("detector {name} {value} is not finite, using {fallback}");
            fallback
        }
    };

    DetectorSettings {
        base_threshold: finite_or("base threshold", settings.base_threshold, defaults.base_threshold),
        min_peak_slope: finite_or("peak slope", settings.min_peak_slope, defaults.min_peak_slope),
        prominence_factor: finite_or(
            "prominence factor",
            settings.prominence_factor,
            defaults.prominence_factor,
        ),
        ..settings
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new(DetectorSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        let adaptive = StepDetector::new(DetectorSettings::default());
        assert_eq!(adaptive.kind(), DetectorKind::Adaptive);

        let threshold = StepDetector::new(DetectorSettings {
            kind: DetectorKind::Threshold,
            ..Default::default()
        });
        assert_eq!(threshold.kind(), DetectorKind::Threshold);
    }

    #[test]
    fn test_switching_strategy_starts_clean() {
        let mut detector = StepDetector::default();
        for i in 0..12 {
            detector.update(9.8, Duration::from_millis(i * 50));
        }
        assert_eq!(detector.stats().sample_count, 12);

        detector.set_settings(DetectorSettings {
            kind: DetectorKind::Threshold,
            ..Default::default()
        });
        assert_eq!(detector.kind(), DetectorKind::Threshold);
        assert_eq!(detector.stats().sample_count, 0);
    }

    #[test]
    fn test_same_strategy_keeps_history() {
        let mut detector = StepDetector::default();
        for i in 0..3 {
            detector.update(9.8, Duration::from_millis(i * 50));
        }
        detector.set_settings(DetectorSettings {
            min_peak_interval: Duration::from_millis(300),
            ..Default::default()
        });
        assert_eq!(detector.stats().sample_count, 3);
        assert_eq!(detector.settings().min_peak_interval, Duration::from_millis(300));
    }

    #[test]
    fn test_non_finite_settings_use_defaults() {
        let detector = StepDetector::new(DetectorSettings {
            kind: DetectorKind::Threshold,
            base_threshold: f32::NAN,
            ..Default::default()
        });
        assert_eq!(detector.settings().base_threshold, 10.5);
        assert!((detector.stats().threshold - 10.5).abs() < 1e-5);

        let mut detector = StepDetector::default();
        detector.set_settings(DetectorSettings {
            base_threshold: f32::NEG_INFINITY,
            min_peak_slope: f32::NAN,
            ..Default::default()
        });
        assert_eq!(detector.settings(), DetectorSettings::default());
        assert_eq!(detector.stats().threshold, 10.5);
    }

    #[test]
    fn test_strategies_agree_on_a_clean_peak() {
        let trace = [9.8, 9.8, 9.8, 9.8, 9.8, 12.0, 14.0, 13.0, 9.8];
        for kind in [DetectorKind::Adaptive, DetectorKind::Threshold] {
            let mut detector = StepDetector::new(DetectorSettings {
                kind,
                ..Default::default()
            });
            let steps = trace
                .iter()
                .enumerate()
                .filter(|(i, m)| {
                    detector
                        .update(**m, Duration::from_millis(*i as u64 * 100))
                        .is_some()
                })
                .count();
            assert_eq!(steps, 1, "{kind} detector");
        }
    }
}
