//! Landmark sources
//!
//! Face finding and landmark localization happen in an external detector
//! process; this module defines the boundary it feeds frames through.

use std::io::BufRead;

use eye_metrics::Point2;
use serde::Deserialize;
use tracing::warn;

/// One event from the landmark stream
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A face with a full landmark set was detected this frame
    Landmarks(Vec<Point2>),
    /// The frame was captured but no face was found
    FaceLost,
    /// The stream has ended
    EndOfStream,
}

/// Supplies per-frame landmarks in strict capture order.
///
/// The drowsiness threshold counts delivered frames, not wall-clock time:
/// a source that drops frames under load stretches the effective alert
/// latency, and the host should tune `consec_frames` against the frame
/// rate it actually sustains.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> FrameEvent;
}

/// Wire format for one frame on stdin
#[derive(Debug, Deserialize)]
struct FrameRecord {
    /// 68 `[x, y]` pairs, or null when no face was detected
    landmarks: Option<Vec<[f64; 2]>>,
}

/// Reads JSON-lines frames, one object per captured frame:
/// `{"landmarks": [[x, y], ...]}` or `{"landmarks": null}`.
///
/// A malformed line is logged and treated as a lost face, so a glitching
/// detector degrades to the freeze policy instead of corrupting the count.
pub struct JsonLinesSource<R> {
    reader: R,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn parse_line(line: &str) -> FrameEvent {
        match serde_json::from_str::<FrameRecord>(line) {
            Ok(FrameRecord {
                landmarks: Some(pairs),
            }) => FrameEvent::Landmarks(
                pairs
                    .into_iter()
                    .map(|[x, y]| Point2::new(x, y))
                    .collect(),
            ),
            Ok(FrameRecord { landmarks: None }) => FrameEvent::FaceLost,
            Err(e) => {
                warn!("malformed frame record, treating as lost face: {e}");
                FrameEvent::FaceLost
            }
        }
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> FrameEvent {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return FrameEvent::EndOfStream,
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Self::parse_line(trimmed);
                }
                Err(e) => {
                    warn!("input read error, ending stream: {e}");
                    return FrameEvent::EndOfStream;
                }
            }
        }
    }
}

/// Replays a fixed frame sequence
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: std::collections::VecDeque<FrameEvent>,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = FrameEvent>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> FrameEvent {
        self.frames.pop_front().unwrap_or(FrameEvent::EndOfStream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_landmark_and_null_records() {
        let input = "{\"landmarks\": [[1.0, 2.0], [3.0, 4.0]]}\n{\"landmarks\": null}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));

        match source.next_frame() {
            FrameEvent::Landmarks(points) => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[0], Point2::new(1.0, 2.0));
            }
            other => panic!("expected landmarks, got {other:?}"),
        }
        assert_eq!(source.next_frame(), FrameEvent::FaceLost);
        assert_eq!(source.next_frame(), FrameEvent::EndOfStream);
    }

    #[test]
    fn test_malformed_line_degrades_to_lost_face() {
        let input = "not json at all\n{\"landmarks\": null}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));
        assert_eq!(source.next_frame(), FrameEvent::FaceLost);
        assert_eq!(source.next_frame(), FrameEvent::FaceLost);
        assert_eq!(source.next_frame(), FrameEvent::EndOfStream);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let input = "\n\n{\"landmarks\": null}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));
        assert_eq!(source.next_frame(), FrameEvent::FaceLost);
    }

    #[test]
    fn test_scripted_source_replays_then_ends() {
        let mut source = ScriptedSource::new([FrameEvent::FaceLost]);
        assert_eq!(source.next_frame(), FrameEvent::FaceLost);
        assert_eq!(source.next_frame(), FrameEvent::EndOfStream);
    }
}
