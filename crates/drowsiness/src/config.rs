//! Drowsiness detection configuration

use serde::{Deserialize, Serialize};

use crate::DrowsinessError;

/// Detection thresholds, immutable for the lifetime of a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrowsinessConfig {
    /// Eye aspect ratio below which a frame counts as eyes-closed
    /// (default: 0.25)
    pub ear_threshold: f64,

    /// Consecutive closed-eye frames required to raise the alert
    /// (default: 20). Counted in delivered frames, not wall-clock time, so
    /// hosts should tune this against their expected frame rate.
    pub consec_frames: u32,

    /// Window for the rolling mean applied to the combined ratio before
    /// counting (default: 1, no smoothing). Smoothing softens the strict
    /// one-open-frame reset, so it is opt-in.
    pub smoothing_window: usize,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            consec_frames: 20,
            smoothing_window: 1,
        }
    }
}

impl DrowsinessConfig {
    /// Create strict config (alerts sooner)
    pub fn strict() -> Self {
        Self {
            ear_threshold: 0.27,
            consec_frames: 12,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer closures)
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.22,
            consec_frames: 30,
            ..Default::default()
        }
    }

    /// Check threshold sanity before a session starts
    pub fn validate(&self) -> Result<(), DrowsinessError> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err(DrowsinessError::Config(format!(
                "ear_threshold must be positive and finite, got {}",
                self.ear_threshold
            )));
        }
        if self.consec_frames == 0 {
            return Err(DrowsinessError::Config(
                "consec_frames must be at least 1".into(),
            ));
        }
        if self.smoothing_window == 0 {
            return Err(DrowsinessError::Config(
                "smoothing_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
