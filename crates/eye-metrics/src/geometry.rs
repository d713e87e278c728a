//! Eye landmark types and the aspect ratio computation

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::MetricError;

/// Number of landmark points describing one eye
pub const LANDMARKS_PER_EYE: usize = 6;

/// Number of points in the standard 68-point face landmark model
pub const FACE_LANDMARK_COUNT: usize = 68;

/// Left eye indices within the 68-point face landmark model
pub const LEFT_EYE_RANGE: Range<usize> = 42..48;

/// Right eye indices within the 68-point face landmark model
pub const RIGHT_EYE_RANGE: Range<usize> = 36..42;

/// 2D landmark point in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Six landmarks of one eye in fixed anatomical order: outer corner, two
/// upper-lid points, inner corner, two lower-lid points.
///
/// The order is load-bearing: the aspect ratio pairs upper-lid points with
/// lower-lid points and must not be permuted between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks {
    points: [Point2; LANDMARKS_PER_EYE],
}

impl EyeLandmarks {
    /// Create from exactly six ordered points
    pub fn new(points: [Point2; LANDMARKS_PER_EYE]) -> Self {
        Self { points }
    }

    /// Create from a slice, validating the point count
    pub fn from_slice(points: &[Point2]) -> Result<Self, MetricError> {
        let points: [Point2; LANDMARKS_PER_EYE] =
            points
                .try_into()
                .map_err(|_| MetricError::InvalidLandmarkSet {
                    expected: LANDMARKS_PER_EYE,
                    actual: points.len(),
                })?;
        Ok(Self { points })
    }

    /// The six points in anatomical order
    pub fn points(&self) -> &[Point2; LANDMARKS_PER_EYE] {
        &self.points
    }

    /// Eye aspect ratio: the sum of the two vertical lid distances over
    /// twice the horizontal corner distance.
    ///
    /// Open eyes sit roughly in the 0.25-0.4 band; the ratio collapses
    /// toward zero as the lids close. Pure function of the six points.
    pub fn aspect_ratio(&self) -> Result<f64, MetricError> {
        let [p1, p2, p3, p4, p5, p6] = self.points;

        let vertical_a = p2.distance_to(&p6);
        let vertical_b = p3.distance_to(&p5);
        let horizontal = p1.distance_to(&p4);

        if horizontal == 0.0 {
            return Err(MetricError::DegenerateGeometry);
        }

        Ok((vertical_a + vertical_b) / (2.0 * horizontal))
    }
}

/// Extract the (left, right) eye landmark sets from a full 68-point face
/// landmark array, as produced by standard shape predictors.
pub fn eyes_from_face_landmarks(
    points: &[Point2],
) -> Result<(EyeLandmarks, EyeLandmarks), MetricError> {
    if points.len() != FACE_LANDMARK_COUNT {
        return Err(MetricError::InvalidLandmarkSet {
            expected: FACE_LANDMARK_COUNT,
            actual: points.len(),
        });
    }

    let left = EyeLandmarks::from_slice(&points[LEFT_EYE_RANGE])?;
    let right = EyeLandmarks::from_slice(&points[RIGHT_EYE_RANGE])?;
    Ok((left, right))
}
