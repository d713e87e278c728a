//! Eye Landmark Metrics
//!
//! Converts facial eye landmarks into a scalar openness ratio:
//! - 2D landmark points and per-eye landmark sets
//! - Eye aspect ratio (EAR) computation
//! - Eye extraction from 68-point face landmark sets
//! - Rolling-mean smoothing over the per-frame ratio stream

pub mod geometry;
pub mod smoothing;

pub use geometry::{
    eyes_from_face_landmarks, EyeLandmarks, Point2, FACE_LANDMARK_COUNT, LANDMARKS_PER_EYE,
    LEFT_EYE_RANGE, RIGHT_EYE_RANGE,
};
pub use smoothing::RollingMean;

use thiserror::Error;

/// Eye metric error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("landmark set has {actual} points, expected {expected}")]
    InvalidLandmarkSet { expected: usize, actual: usize },

    #[error("degenerate eye geometry: zero horizontal span")]
    DegenerateGeometry,
}
