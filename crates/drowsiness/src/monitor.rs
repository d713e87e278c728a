//! Per-frame alert coordination
//!
//! Bridges the pure tracker to externally observable behavior: computes the
//! combined openness ratio from both eyes, applies optional smoothing, and
//! emits edge-triggered start/stop commands toward the alert sink.

use alerting::AlertSink;
use eye_metrics::{EyeLandmarks, RollingMean};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{DriverStatus, DrowsinessConfig, DrowsinessError, DrowsinessTracker, TrackerState};

/// Result of ingesting one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameResult {
    /// Smoothed combined openness ratio; `None` when the frame carried no
    /// landmarks and the state was frozen
    pub ratio: Option<f64>,
    /// Post-transition tracker state
    pub state: TrackerState,
    /// Driver status derived from the state
    pub status: DriverStatus,
}

/// Owns the tracker and the alert sink for one monitoring session.
///
/// The per-frame contract is `on_frame`: landmarks in, status out, with
/// alarm side effects confined to state transitions. Decision logic stays
/// in the tracker, so it tests without any sink at all.
pub struct DrowsinessMonitor<S: AlertSink> {
    tracker: DrowsinessTracker,
    smoother: RollingMean,
    sink: S,
}

impl<S: AlertSink> DrowsinessMonitor<S> {
    /// Create a monitor, validating the configuration
    pub fn new(config: DrowsinessConfig, sink: S) -> Result<Self, DrowsinessError> {
        let tracker = DrowsinessTracker::new(config)?;
        let smoother = RollingMean::new(tracker.config().smoothing_window);
        Ok(Self {
            tracker,
            smoother,
            sink,
        })
    }

    /// Ingest one frame's eye landmarks; `None` means no face was detected.
    ///
    /// A landmark-less frame freezes the tracker: the closure streak is
    /// neither advanced nor reset, so transient detection loss cannot raise
    /// a false alarm or mask a building one. A geometry failure on either
    /// eye propagates before the tracker or smoother is touched - a
    /// poisoned ratio never reaches the counter.
    pub fn on_frame(
        &mut self,
        eyes: Option<(&EyeLandmarks, &EyeLandmarks)>,
    ) -> Result<FrameResult, DrowsinessError> {
        let (left, right) = match eyes {
            Some(pair) => pair,
            None => {
                let state = self.tracker.state();
                debug!(
                    "no landmarks this frame, tracker frozen at {} low frames",
                    state.consecutive_low
                );
                return Ok(FrameResult {
                    ratio: None,
                    state,
                    status: state.status(),
                });
            }
        };

        let left_ratio = left.aspect_ratio()?;
        let right_ratio = right.aspect_ratio()?;
        let combined = (left_ratio + right_ratio) / 2.0;
        if !combined.is_finite() {
            return Err(DrowsinessError::InvalidRatio(combined));
        }

        let smoothed = self.smoother.push(combined);
        let was_active = self.tracker.state().alert_active;
        let state = self.tracker.update(smoothed)?;

        if state.alert_active && !was_active {
            warn!(
                "drowsiness detected (ratio {:.3}, {} consecutive low frames)",
                smoothed, state.consecutive_low
            );
            self.sink.start_alert();
        } else if !state.alert_active && was_active {
            info!("driver recovered (ratio {:.3})", smoothed);
            self.sink.stop_alert();
        }

        Ok(FrameResult {
            ratio: Some(smoothed),
            state,
            status: state.status(),
        })
    }

    /// Current tracker state without ingesting a frame
    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Restart the session: stop an active alarm and clear all state
    pub fn reset(&mut self) {
        if self.tracker.state().alert_active {
            self.sink.stop_alert();
        }
        self.tracker.reset();
        self.smoother.reset();
    }

    /// The owned sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::CountingSink;
    use eye_metrics::Point2;

    /// Eye with vertical lid distances equal to `openness` and a horizontal
    /// span of 1.0, so the aspect ratio equals `openness`.
    fn eye(openness: f64) -> EyeLandmarks {
        let half = openness / 2.0;
        EyeLandmarks::new([
            Point2::new(0.0, 0.0),
            Point2::new(0.25, half),
            Point2::new(0.75, half),
            Point2::new(1.0, 0.0),
            Point2::new(0.75, -half),
            Point2::new(0.25, -half),
        ])
    }

    fn monitor(config: DrowsinessConfig) -> DrowsinessMonitor<CountingSink> {
        DrowsinessMonitor::new(config, CountingSink::default()).unwrap()
    }

    fn default_monitor() -> DrowsinessMonitor<CountingSink> {
        monitor(DrowsinessConfig::default())
    }

    #[test]
    fn test_start_emitted_once_on_twentieth_frame() {
        let mut monitor = default_monitor();
        let closed = eye(0.10);

        for _ in 0..19 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
            assert_eq!(monitor.sink().starts, 0);
        }

        let result = monitor.on_frame(Some((&closed, &closed))).unwrap();
        assert_eq!(result.status, DriverStatus::Drowsy);
        assert_eq!(monitor.sink().starts, 1);

        // Sustained closure must not re-trigger the alarm
        for _ in 0..5 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
        }
        assert_eq!(monitor.sink().starts, 1);
        assert_eq!(monitor.sink().stops, 0);
    }

    #[test]
    fn test_stop_emitted_once_on_recovery() {
        let mut monitor = default_monitor();
        let closed = eye(0.10);
        let open = eye(0.30);

        for _ in 0..20 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
        }
        let result = monitor.on_frame(Some((&open, &open))).unwrap();
        assert_eq!(result.status, DriverStatus::Alert);
        assert_eq!(result.state.consecutive_low, 0);
        assert_eq!(monitor.sink().stops, 1);

        monitor.on_frame(Some((&open, &open))).unwrap();
        assert_eq!(monitor.sink().stops, 1);
    }

    #[test]
    fn test_near_miss_emits_nothing() {
        let mut monitor = default_monitor();
        let closed = eye(0.10);
        let open = eye(0.30);

        for _ in 0..19 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
        }
        let result = monitor.on_frame(Some((&open, &open))).unwrap();
        assert_eq!(result.state, TrackerState::default());
        assert_eq!(monitor.sink().starts, 0);
        assert_eq!(monitor.sink().stops, 0);
    }

    #[test]
    fn test_missing_landmarks_freeze_the_streak() {
        let mut monitor = default_monitor();
        let closed = eye(0.10);

        for _ in 0..10 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
        }
        for _ in 0..5 {
            let result = monitor.on_frame(None).unwrap();
            assert_eq!(result.ratio, None);
            assert_eq!(result.state.consecutive_low, 10);
            assert!(!result.state.alert_active);
        }

        // The streak resumes where it left off
        for _ in 0..9 {
            monitor.on_frame(Some((&closed, &closed))).unwrap();
        }
        assert_eq!(monitor.sink().starts, 0);
        let result = monitor.on_frame(Some((&closed, &closed))).unwrap();
        assert!(result.state.alert_active);
        assert_eq!(monitor.sink().starts, 1);
    }

    #[test]
    fn test_degenerate_eye_leaves_state_untouched() {
        let mut monitor = default_monitor();
        let closed = eye(0.10);
        monitor.on_frame(Some((&closed, &closed))).unwrap();
        let before = monitor.state();

        let degenerate = EyeLandmarks::new([Point2::new(1.0, 1.0); 6]);
        let result = monitor.on_frame(Some((&degenerate, &closed)));
        assert!(matches!(result, Err(DrowsinessError::Metric(_))));
        assert_eq!(monitor.state(), before);
    }

    #[test]
    fn test_eyes_are_averaged() {
        // One eye wide open, one closed: (0.40 + 0.06) / 2 = 0.23 < 0.25
        let mut monitor = monitor(DrowsinessConfig {
            consec_frames: 1,
            ..Default::default()
        });
        let result = monitor
            .on_frame(Some((&eye(0.40), &eye(0.06))))
            .unwrap();
        assert!((result.ratio.unwrap() - 0.23).abs() < 1e-9);
        assert!(result.state.alert_active);
    }

    #[test]
    fn test_smoothing_window_averages_recent_frames() {
        let mut monitor = monitor(DrowsinessConfig {
            smoothing_window: 2,
            consec_frames: 1,
            ..Default::default()
        });
        let result = monitor.on_frame(Some((&eye(0.40), &eye(0.40)))).unwrap();
        assert!((result.ratio.unwrap() - 0.40).abs() < 1e-9);

        // Mean of 0.40 and 0.10 is exactly the threshold, which counts as open
        let result = monitor.on_frame(Some((&eye(0.10), &eye(0.10)))).unwrap();
        assert!((result.ratio.unwrap() - 0.25).abs() < 1e-9);
        assert!(!result.state.alert_active);

        // Window slides to [0.10, 0.10] and the alert raises
        let result = monitor.on_frame(Some((&eye(0.10), &eye(0.10)))).unwrap();
        assert!((result.ratio.unwrap() - 0.10).abs() < 1e-9);
        assert!(result.state.alert_active);
    }

    #[test]
    fn test_reset_stops_an_active_alarm() {
        let mut monitor = monitor(DrowsinessConfig {
            consec_frames: 2,
            ..Default::default()
        });
        let closed = eye(0.10);
        monitor.on_frame(Some((&closed, &closed))).unwrap();
        monitor.on_frame(Some((&closed, &closed))).unwrap();
        assert_eq!(monitor.sink().starts, 1);

        monitor.reset();
        assert_eq!(monitor.sink().stops, 1);
        assert_eq!(monitor.state(), TrackerState::default());

        // Resetting an idle monitor emits nothing further
        monitor.reset();
        assert_eq!(monitor.sink().stops, 1);
    }

    #[test]
    fn test_frame_result_serializes_for_downstream_consumers() {
        let mut monitor = default_monitor();
        let result = monitor.on_frame(Some((&eye(0.30), &eye(0.30)))).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "Alert");
        assert_eq!(json["state"]["consecutive_low"], 0);
        assert!(json["ratio"].as_f64().is_some());
    }
}
