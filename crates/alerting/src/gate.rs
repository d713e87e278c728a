//! Alarm re-trigger gating

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AlertSink;

/// Alert sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Whether alarm commands are forwarded at all (default: true)
    pub enabled: bool,
    /// Minimum seconds after one alarm stops before the next is forwarded
    /// (default: 0 - a drowsiness alarm is not throttled unless the host
    /// asks for it)
    pub cooldown_seconds: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 0,
        }
    }
}

/// Wraps a sink and suppresses alarm restarts that arrive within the
/// cooldown of the previous alarm's stop.
///
/// A suppressed start swallows its paired stop, so the inner sink always
/// sees balanced start/stop commands.
pub struct CooldownGate<S: AlertSink> {
    inner: S,
    cooldown: Duration,
    last_stop: Option<Instant>,
    forwarding: bool,
    fired: usize,
    suppressed: usize,
}

impl<S: AlertSink> CooldownGate<S> {
    /// Wrap a sink with the given cooldown
    pub fn new(inner: S, cooldown: Duration) -> Self {
        Self {
            inner,
            cooldown,
            last_stop: None,
            forwarding: false,
            fired: 0,
            suppressed: 0,
        }
    }

    /// Alarms forwarded to the inner sink
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Alarms swallowed by the cooldown
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// The wrapped sink
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn in_cooldown(&self) -> bool {
        match self.last_stop {
            Some(stopped) => stopped.elapsed() < self.cooldown,
            None => false,
        }
    }
}

impl<S: AlertSink> AlertSink for CooldownGate<S> {
    fn start_alert(&mut self) {
        if self.in_cooldown() {
            self.suppressed += 1;
            debug!(
                "alarm suppressed: within {:?} cooldown of previous stop",
                self.cooldown
            );
            return;
        }
        self.forwarding = true;
        self.fired += 1;
        self.inner.start_alert();
    }

    fn stop_alert(&mut self) {
        if !self.forwarding {
            return;
        }
        self.forwarding = false;
        self.last_stop = Some(Instant::now());
        self.inner.stop_alert();
    }
}
