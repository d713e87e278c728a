//! Consecutive-closure tracking state machine

use serde::{Deserialize, Serialize};

use crate::{DrowsinessConfig, DrowsinessError};

/// Tracker state snapshot, returned after every update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerState {
    /// Consecutive frames with the ratio below threshold
    pub consecutive_low: u32,
    /// Whether the sustained-closure condition is in effect
    pub alert_active: bool,
}

impl TrackerState {
    /// Derive the externally visible driver status from this snapshot
    pub fn status(&self) -> DriverStatus {
        if self.alert_active {
            DriverStatus::Drowsy
        } else if self.consecutive_low > 0 {
            DriverStatus::Counting {
                frames: self.consecutive_low,
            }
        } else {
            DriverStatus::Alert
        }
    }
}

/// Driver status derived from the tracker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    /// Eyes open, no closure streak in progress
    Alert,
    /// Closure streak in progress, still below the alert threshold
    Counting { frames: u32 },
    /// Sustained closure detected
    Drowsy,
}

impl DriverStatus {
    /// String label for logging and IPC
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Counting { .. } => "counting",
            Self::Drowsy => "drowsy",
        }
    }
}

/// Debounces noisy per-frame openness ratios into a stable drowsiness
/// decision.
///
/// A frame with the ratio below threshold extends the closure streak; the
/// alert raises once the streak reaches `consec_frames` and holds while
/// low frames continue. Any frame at or above threshold resets the streak
/// unconditionally - the requirement is strictly consecutive, not a
/// decaying count - so frames must be delivered in capture order.
#[derive(Debug, Clone)]
pub struct DrowsinessTracker {
    config: DrowsinessConfig,
    state: TrackerState,
}

impl DrowsinessTracker {
    /// Create a tracker, validating the configuration
    pub fn new(config: DrowsinessConfig) -> Result<Self, DrowsinessError> {
        config.validate()?;
        Ok(Self {
            config,
            state: TrackerState::default(),
        })
    }

    /// Feed one combined per-frame ratio and return the post-transition
    /// state.
    ///
    /// Pure arithmetic; a non-finite ratio is rejected without touching the
    /// count, so a poisoned upstream value cannot corrupt the streak.
    pub fn update(&mut self, ratio: f64) -> Result<TrackerState, DrowsinessError> {
        if !ratio.is_finite() {
            return Err(DrowsinessError::InvalidRatio(ratio));
        }

        if ratio < self.config.ear_threshold {
            self.state.consecutive_low = self.state.consecutive_low.saturating_add(1);
            if self.state.consecutive_low >= self.config.consec_frames {
                self.state.alert_active = true;
            }
        } else {
            self.state = TrackerState::default();
        }

        Ok(self.state)
    }

    /// Current state snapshot without ingesting a frame
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Configured thresholds
    pub fn config(&self) -> &DrowsinessConfig {
        &self.config
    }

    /// Return to the initial state (new monitoring session)
    pub fn reset(&mut self) {
        self.state = TrackerState::default();
    }
}
