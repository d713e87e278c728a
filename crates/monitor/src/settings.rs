//! Monitor configuration loading

use alerting::AlertConfig;
use config::{Config, Environment, File};
use drowsiness::DrowsinessConfig;
use serde::{Deserialize, Serialize};

/// Top-level monitor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Drowsiness detection thresholds
    pub detection: DrowsinessConfig,
    /// Alarm gating
    pub alerting: AlertConfig,
    /// Log level: trace, debug, info, warn, or error
    pub log_level: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            detection: DrowsinessConfig::default(),
            alerting: AlertConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl MonitorSettings {
    /// Layer defaults, an optional TOML file, and environment overrides
    /// (e.g. `DROWSY_DETECTION__CONSEC_FRAMES=30`).
    ///
    /// With no explicit path, `monitor.toml` is read if present next to the
    /// working directory; a missing file falls back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        builder = match path {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("monitor").required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("DROWSY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
