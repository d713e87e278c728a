//! Alert sink implementations

use tracing::{info, warn};

/// Receives alarm lifecycle commands from the decision engine.
///
/// The engine emits each command exactly once per state transition, but
/// implementations must tolerate a duplicate stop (e.g. after a session
/// reset) without side effects.
pub trait AlertSink {
    /// The sustained-closure condition began
    fn start_alert(&mut self);

    /// The condition cleared
    fn stop_alert(&mut self);
}

impl<S: AlertSink + ?Sized> AlertSink for Box<S> {
    fn start_alert(&mut self) {
        (**self).start_alert();
    }

    fn stop_alert(&mut self) {
        (**self).stop_alert();
    }
}

/// Logs alarm commands. Stands in for audio playback, which belongs to the
/// host's hardware layer.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn start_alert(&mut self) {
        warn!("ALARM ON - sustained eye closure detected");
    }

    fn stop_alert(&mut self) {
        info!("alarm off - driver responsive again");
    }
}

/// Discards all commands (alerting disabled)
#[derive(Debug, Default)]
pub struct NullSink;

impl AlertSink for NullSink {
    fn start_alert(&mut self) {}

    fn stop_alert(&mut self) {}
}

/// Counts commands; useful in tests and diagnostics
#[derive(Debug, Default)]
pub struct CountingSink {
    /// Number of start commands received
    pub starts: usize,
    /// Number of stop commands received
    pub stops: usize,
}

impl AlertSink for CountingSink {
    fn start_alert(&mut self) {
        self.starts += 1;
    }

    fn stop_alert(&mut self) {
        self.stops += 1;
    }
}
