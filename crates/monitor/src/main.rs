//! Drowsiness Monitor - Main Entry Point
//!
//! Reads per-frame face landmarks as JSON lines on stdin (produced by an
//! external detector process), runs the drowsiness decision engine, and
//! writes per-frame results as JSON lines on stdout. Logs go to stderr so
//! the result stream stays machine-readable.

mod session;
mod settings;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::session::Session;
use crate::settings::MonitorSettings;
use crate::source::JsonLinesSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let settings = MonitorSettings::load(config_path.as_deref())
        .context("failed to load configuration")?;

    init_logging(&settings.log_level)?;

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "thresholds: ratio < {} for {} consecutive frames",
        settings.detection.ear_threshold, settings.detection.consec_frames
    );

    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("shutdown requested");
            stop_signal.store(true, Ordering::SeqCst);
        }
    });

    let mut session = Session::new(&settings).context("failed to start session")?;
    let stats = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut source = JsonLinesSource::new(stdin.lock());
        let stdout = std::io::stdout();
        session.run(&mut source, &stop, stdout.lock())
    })
    .await
    .context("session task panicked")?;

    info!(
        "session complete: {} frames, {} with a face, {} skipped, {} alarms",
        stats.frames, stats.faces_seen, stats.frames_skipped, stats.alerts_raised
    );
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level: tracing::Level = level
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid log level: {level}"))?;
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
