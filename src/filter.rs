//! Single-pole low-pass filter for the acceleration magnitude

use crate::math::GRAVITY;
use crate::types::FilterSettings;

/// Valid range of the smoothing factor
pub const MIN_ALPHA: f32 = 0.1;
pub const MAX_ALPHA: f32 = 1.0;

/// Exponential moving average over the acceleration magnitude
///
/// `filtered = α·raw + (1 − α)·filtered_prev`. The state starts at the
/// gravity baseline so the first samples of a resting phone do not look
/// like a spike.
///
/// # Example
/// ```
/// use pdr_tracker::{FilterSettings, MotionFilter};
///
/// let mut filter = MotionFilter::new(FilterSettings { enabled: true, alpha: 0.5 });
/// let filtered = filter.filter(11.8);
/// assert!((filtered - 10.8).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MotionFilter {
    enabled: bool,
    alpha: f32,
    filtered: f32,
}

impl MotionFilter {
    /// Create a filter, clamping α into [0.1, 1.0]
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            enabled: settings.enabled,
            alpha: clamp_alpha(settings.alpha),
            filtered: GRAVITY,
        }
    }

    /// Feed one raw magnitude and return the filtered value
    ///
    /// A disabled filter passes the raw value through but still tracks it,
    /// so the current magnitude stays observable.
    pub fn filter(&mut self, raw: f32) -> f32 {
        self.filtered = if self.enabled {
            self.alpha * raw + (1.0 - self.alpha) * self.filtered
        } else {
            raw
        };
        self.filtered
    }

    /// Apply new settings without discarding the filter state
    pub fn set_settings(&mut self, settings: FilterSettings) {
        self.enabled = settings.enabled;
        self.alpha = clamp_alpha(settings.alpha);
    }

    /// Return to the gravity baseline
    pub fn reset(&mut self) {
        self.filtered = GRAVITY;
    }

    /// Last filtered value
    pub fn value(&self) -> f32 {
        self.filtered
    }

    /// Effective smoothing factor after clamping
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MotionFilter {
    fn default() -> Self {
        Self::new(FilterSettings::default())
    }
}

/// Clamp α into the valid range, falling back to the default for NaN
pub fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        return FilterSettings::default().alpha;
    }
    alpha.clamp(MIN_ALPHA, MAX_ALPHA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_gravity() {
        let filter = MotionFilter::default();
        assert_eq!(filter.value(), GRAVITY);
    }

    #[test]
    fn test_exponential_smoothing() {
        let mut filter = MotionFilter::new(FilterSettings {
            enabled: true,
            alpha: 0.25,
        });

        let first = filter.filter(13.8);
        // 0.25 * 13.8 + 0.75 * 9.8
        assert!((first - 10.8).abs() < 1e-5);

        let second = filter.filter(13.8);
        assert!((second - 11.55).abs() < 1e-5);
        assert_eq!(filter.value(), second);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut filter = MotionFilter::default();
        for _ in 0..200 {
            filter.filter(12.0);
        }
        assert!((filter.value() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_passes_through() {
        let mut filter = MotionFilter::new(FilterSettings {
            enabled: false,
            alpha: 0.3,
        });
        assert_eq!(filter.filter(13.0), 13.0);
        assert_eq!(filter.filter(9.0), 9.0);
        assert_eq!(filter.value(), 9.0);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let low = MotionFilter::new(FilterSettings {
            enabled: true,
            alpha: 0.01,
        });
        assert_eq!(low.alpha(), MIN_ALPHA);

        let high = MotionFilter::new(FilterSettings {
            enabled: true,
            alpha: 4.0,
        });
        assert_eq!(high.alpha(), MAX_ALPHA);

        assert_eq!(clamp_alpha(f32::NAN), 0.3);
    }

    #[test]
    fn test_alpha_one_is_identity() {
        let mut filter = MotionFilter::new(FilterSettings {
            enabled: true,
            alpha: 1.0,
        });
        assert_eq!(filter.filter(12.5), 12.5);
    }

    #[test]
    fn test_set_settings_keeps_state() {
        let mut filter = MotionFilter::default();
        filter.filter(12.0);
        let before = filter.value();

        filter.set_settings(FilterSettings {
            enabled: true,
            alpha: 0.5,
        });
        assert_eq!(filter.value(), before);
        assert_eq!(filter.alpha(), 0.5);
    }

    #[test]
    fn test_reset() {
        let mut filter = MotionFilter::default();
        filter.filter(15.0);
        filter.reset();
        assert_eq!(filter.value(), GRAVITY);
    }
}
