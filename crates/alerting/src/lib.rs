//! Alerting
//!
//! The alert-sink boundary between the drowsiness decision engine and the
//! host's alarm hardware, plus gating that keeps a flapping decision from
//! restarting the alarm.

mod gate;
mod sink;

pub use gate::{AlertConfig, CooldownGate};
pub use sink::{AlertSink, CountingSink, NullSink, TracingSink};
