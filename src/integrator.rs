//! Dead-reckoning position integration

use crate::types::Position;

/// Shortest accepted step length in meters
pub const MIN_STEP_LENGTH: f32 = 0.01;

/// Accumulates one fixed-length displacement per step along the heading
///
/// Heading 0 faces the negative Z axis: `forward = (sin h, −cos h)`. Every
/// step is trusted fully; there is no smoothing or outlier rejection.
///
/// # Example
/// ```
/// use pdr_tracker::DeadReckoning;
///
/// let mut integrator = DeadReckoning::new(0.65, 1.6);
/// let position = integrator.on_step(0.0);
/// assert!((position.z + 0.65).abs() < 1e-6);
/// assert_eq!(integrator.step_count(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeadReckoning {
    step_length: f32,
    initial_height: f32,
    position: Position,
    step_count: u32,
    distance: f32,
}

impl DeadReckoning {
    /// Start at the floor origin with the given stride and height
    pub fn new(step_length: f32, initial_height: f32) -> Self {
        Self {
            step_length: clamp_step_length(step_length),
            initial_height,
            position: Position::origin(initial_height),
            step_count: 0,
            distance: 0.0,
        }
    }

    /// Advance one step along `heading` (radians) and return the new position
    pub fn on_step(&mut self, heading: f32) -> Position {
        let (sin, cos) = heading.sin_cos();
        self.position.x += sin * self.step_length;
        self.position.z += -cos * self.step_length;
        self.step_count += 1;
        self.distance += self.step_length;
        self.position
    }

    /// Change the stride for subsequent steps
    pub fn set_step_length(&mut self, step_length: f32) {
        self.step_length = clamp_step_length(step_length);
    }

    /// Change the fixed height, applied immediately
    pub fn set_initial_height(&mut self, height: f32) {
        self.initial_height = height;
        self.position.y = height;
    }

    pub fn step_length(&self) -> f32 {
        self.step_length
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Total distance walked, independent of direction changes
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Return to the origin and zero the step count
    pub fn reset(&mut self) {
        self.position = Position::origin(self.initial_height);
        self.step_count = 0;
        self.distance = 0.0;
    }
}

impl Default for DeadReckoning {
    fn default() -> Self {
        Self::new(0.65, 1.6)
    }
}

/// Keep the stride positive; non-finite values fall back to the default
pub fn clamp_step_length(step_length: f32) -> f32 {
    if !step_length.is_finite() {
        return 0.65;
    }
    step_length.max(MIN_STEP_LENGTH)
}
