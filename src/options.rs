//! Runtime configuration payloads
//!
//! The presentation layer changes tracker behaviour with partial option
//! sets. Absent fields keep their current value; out-of-range values are
//! clamped with a warning instead of being rejected.

use core::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filter::{MAX_ALPHA, MIN_ALPHA, clamp_alpha};
use crate::integrator::clamp_step_length;
use crate::types::{DetectorKind, Sensitivity, TrackerSettings};

/// Partial tracker configuration
///
/// # Example
/// ```
/// use pdr_tracker::{Sensitivity, TrackerOptions, TrackerSettings};
///
/// let options = TrackerOptions::from_json(
///     r#"{ "filterAlpha": 0.5, "sensitivity": "high", "stepLength": 0.72 }"#,
/// ).unwrap();
///
/// let mut settings = TrackerSettings::default();
/// options.apply(&mut settings);
/// assert_eq!(settings.filter.alpha, 0.5);
/// assert_eq!(settings.detector.sensitivity, Sensitivity::High);
/// assert_eq!(settings.step_length, 0.72);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerOptions {
    pub filter_enabled: Option<bool>,
    pub filter_alpha: Option<f32>,
    pub sensitivity: Option<Sensitivity>,
    pub step_length: Option<f32>,
    pub min_peak_interval_ms: Option<u64>,
    pub prominence_rejection: Option<bool>,
    pub detector: Option<DetectorKind>,
}

impl TrackerOptions {
    /// Parse a JSON option payload
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merge these options into `settings`, clamping out-of-range values
    pub fn apply(&self, settings: &mut TrackerSettings) {
        if let Some(enabled) = self.filter_enabled {
            settings.filter.enabled = enabled;
        }

        if let Some(alpha) = self.filter_alpha {
            let clamped = clamp_alpha(alpha);
            if clamped != alpha {
                warn!("filter alpha {alpha} outside [{MIN_ALPHA}, {MAX_ALPHA}], using {clamped}");
            }
            settings.filter.alpha = clamped;
        }

        if let Some(sensitivity) = self.sensitivity {
            settings.detector.sensitivity = sensitivity;
        }

        if let Some(step_length) = self.step_length {
            let clamped = clamp_step_length(step_length);
            if clamped != step_length {
                warn!("step length {step_length} is not a positive length, using {clamped}");
            }
            settings.step_length = clamped;
        }

        if let Some(interval) = self.min_peak_interval_ms {
            settings.detector.min_peak_interval = Duration::from_millis(interval);
        }

        if let Some(enabled) = self.prominence_rejection {
            settings.detector.prominence_rejection = enabled;
        }

        if let Some(kind) = self.detector {
            settings.detector.kind = kind;
        }
    }
}
