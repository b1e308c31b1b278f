//! Bounded sliding window of filtered magnitudes

use std::collections::VecDeque;

/// The most recent `capacity` magnitudes, oldest evicted first
///
/// Only the statistics the adaptive threshold needs are exposed: mean,
/// population standard deviation and minimum.
#[derive(Debug, Clone)]
pub struct MagnitudeWindow {
    values: VecDeque<f32>,
    capacity: usize,
}

impl MagnitudeWindow {
    /// Create an empty window; a zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest when full
    pub fn push(&mut self, value: f32) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Change the capacity, dropping the oldest values that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove every value, keeping the capacity
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Arithmetic mean, zero when empty
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    /// Population standard deviation, zero when empty
    pub fn std_dev(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f32>()
            / self.values.len() as f32;
        variance.sqrt()
    }

    /// Smallest value in the window
    pub fn min(&self) -> Option<f32> {
        self.values.iter().copied().reduce(f32::min)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.values.iter()
    }
}
