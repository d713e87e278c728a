//! Temporal Drowsiness Decision Engine
//!
//! Turns a noisy stream of per-frame eye openness ratios into a stable,
//! debounced drowsiness decision:
//! - Per-frame eye aspect ratio from `eye-metrics`
//! - Consecutive-low-frame counting with strict reset on any open frame
//! - Edge-triggered alarm start/stop commands toward an `AlertSink`

pub mod config;
pub mod monitor;
pub mod tracker;

pub use config::DrowsinessConfig;
pub use monitor::{DrowsinessMonitor, FrameResult};
pub use tracker::{DriverStatus, DrowsinessTracker, TrackerState};

use eye_metrics::MetricError;
use thiserror::Error;

/// Drowsiness engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrowsinessError {
    #[error("non-finite openness ratio: {0}")]
    InvalidRatio(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("eye metric computation failed: {0}")]
    Metric(#[from] MetricError),
}
