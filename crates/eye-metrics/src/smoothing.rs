//! Openness ratio smoothing

use std::collections::VecDeque;

/// Sliding-window arithmetic mean over a ratio stream.
///
/// Until the window fills, the mean covers the samples seen so far. With a
/// capacity of 1 the filter is a pass-through.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: VecDeque<f64>,
    capacity: usize,
}

impl RollingMean {
    /// Create a new rolling mean with the given window capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be > 0");
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a sample and return the current windowed mean
    pub fn push(&mut self, value: f64) -> f64 {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(value);
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    /// Number of samples currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no samples have been seen since the last reset
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Discard all samples
    pub fn reset(&mut self) {
        self.window.clear();
    }
}
