//! Heading calibration from device orientation samples

use log::debug;

use crate::math::{DEG_TO_RAD, finite_or_zero, wrap_degrees};

/// One device orientation reading in degrees
///
/// `alpha` is the rotation about the vertical axis and may be missing
/// until the platform has a compass fix. Missing `beta` and `gamma` read
/// as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub alpha: Option<f32>,
    pub beta: f32,
    pub gamma: f32,
}

impl OrientationSample {
    /// Build a sample from possibly missing platform fields
    pub fn from_components(alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) -> Self {
        Self {
            alpha: alpha.filter(|a| a.is_finite()),
            beta: finite_or_zero(beta),
            gamma: finite_or_zero(gamma),
        }
    }
}

/// Converts orientation samples into a heading relative to the first fix
///
/// The first sample carrying an `alpha` becomes the reference heading. It
/// is captured exactly once; only [`OrientationEstimator::reset`] clears
/// it. Every later heading is `reference − alpha`, in radians, wrapped
/// into [-π, π).
///
/// # Example
/// ```
/// use pdr_tracker::OrientationEstimator;
///
/// let mut estimator = OrientationEstimator::new();
/// estimator.observe(Some(40.0), Some(0.0), Some(0.0));
/// let heading = estimator.observe(Some(130.0), Some(0.0), Some(0.0));
/// assert!((heading + core::f32::consts::FRAC_PI_2).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationEstimator {
    reference_alpha: Option<f32>,
    heading: f32,
    last_sample: OrientationSample,
    sample_count: u64,
}

impl OrientationEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one orientation sample and return the cached heading
    ///
    /// A sample without `alpha` never captures the reference and leaves the
    /// heading unchanged. It is not read as alpha 0, which would snap the
    /// heading to the absolute direction of the reference.
    pub fn observe(&mut self, alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) -> f32 {
        let sample = OrientationSample::from_components(alpha, beta, gamma);
        self.last_sample = sample;
        self.sample_count += 1;

        let Some(alpha) = sample.alpha else {
            return self.heading;
        };

        let reference = match self.reference_alpha {
            Some(reference) => reference,
            None => {
                debug!("captured reference heading alpha={alpha:.2}°");
                self.reference_alpha = Some(alpha);
                alpha
            }
        };

        self.heading = wrap_degrees(reference - alpha) * DEG_TO_RAD;
        self.heading
    }

    /// Heading in radians, zero before the first fix
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// The captured reference alpha in degrees
    pub fn reference(&self) -> Option<f32> {
        self.reference_alpha
    }

    pub fn is_calibrated(&self) -> bool {
        self.reference_alpha.is_some()
    }

    /// Most recent sample, after missing-field substitution
    pub fn last_sample(&self) -> OrientationSample {
        self.last_sample
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Forget the reference heading and return to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
