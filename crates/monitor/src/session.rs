//! Monitoring session loop
//!
//! Synchronous frame-by-frame processing: one call into the decision engine
//! per delivered frame, in strict capture order. Capture, detection, and
//! alarm playback all live outside this loop.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use alerting::{AlertSink, CooldownGate, NullSink, TracingSink};
use drowsiness::{DrowsinessError, DrowsinessMonitor, FrameResult};
use eye_metrics::eyes_from_face_landmarks;
use serde::Serialize;
use tracing::warn;

use crate::settings::MonitorSettings;
use crate::source::{FrameEvent, LandmarkSource};

/// Counters for one monitoring session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Frames delivered by the source
    pub frames: u64,
    /// Frames with a usable face
    pub faces_seen: u64,
    /// Frames skipped after a computation failure
    pub frames_skipped: u64,
    /// Alarm activations
    pub alerts_raised: u64,
}

/// Drives the decision engine over a landmark stream
pub struct Session {
    monitor: DrowsinessMonitor<Box<dyn AlertSink + Send>>,
}

impl Session {
    /// Build a session from settings
    pub fn new(settings: &MonitorSettings) -> Result<Self, DrowsinessError> {
        let sink: Box<dyn AlertSink + Send> = if settings.alerting.enabled {
            Box::new(CooldownGate::new(
                TracingSink,
                Duration::from_secs(settings.alerting.cooldown_seconds),
            ))
        } else {
            Box::new(NullSink)
        };

        Ok(Self {
            monitor: DrowsinessMonitor::new(settings.detection.clone(), sink)?,
        })
    }

    /// Run until the source ends or the stop flag is raised.
    ///
    /// Each frame result goes out as one JSON line. A frame whose
    /// computation fails is logged and skipped with the tracker state left
    /// untouched; the next delivered frame is a fresh attempt.
    pub fn run(
        &mut self,
        source: &mut dyn LandmarkSource,
        stop: &AtomicBool,
        mut out: impl Write,
    ) -> SessionStats {
        let mut stats = SessionStats::default();
        let mut was_active = false;

        while !stop.load(Ordering::SeqCst) {
            let result = match source.next_frame() {
                FrameEvent::EndOfStream => break,
                FrameEvent::FaceLost => self.monitor.on_frame(None),
                FrameEvent::Landmarks(points) => match eyes_from_face_landmarks(&points) {
                    Ok((left, right)) => {
                        stats.faces_seen += 1;
                        self.monitor.on_frame(Some((&left, &right)))
                    }
                    Err(e) => Err(e.into()),
                },
            };
            stats.frames += 1;

            match result {
                Ok(frame) => {
                    if frame.state.alert_active && !was_active {
                        stats.alerts_raised += 1;
                    }
                    was_active = frame.state.alert_active;

                    if let Err(e) = write_result(&mut out, &frame) {
                        warn!("output write failed, stopping session: {e}");
                        break;
                    }
                }
                Err(e) => {
                    stats.frames_skipped += 1;
                    warn!("frame skipped: {e}");
                }
            }
        }

        stats
    }
}

fn write_result(out: &mut impl Write, frame: &FrameResult) -> std::io::Result<()> {
    let line = serde_json::to_string(frame)?;
    writeln!(out, "{line}")
}
