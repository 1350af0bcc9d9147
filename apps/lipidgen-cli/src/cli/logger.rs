//! Logging setup.
//!
//! Built on `tracing-subscriber` with two layers: an `EnvFilter` so the
//! standard `RUST_LOG` variable can raise verbosity per module, and an fmt
//! layer writing to stderr so log lines never interleave with generated
//! output on stdout. The configured level from the project file is the
//! fallback when `RUST_LOG` is unset.

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggerLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LoggerLevel {
    fn as_directive(&self) -> &'static str {
        match self {
            LoggerLevel::Debug => "debug",
            LoggerLevel::Info => "info",
            LoggerLevel::Warn => "warn",
            LoggerLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    pub level: LoggerLevel,
    /// Include the log target (module path) in each line.
    pub include_target: bool,
}

/// Installs the global subscriber. Call once, before any routine runs.
pub fn setup_logging(settings: &LoggerSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_directive()));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(settings.include_target);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_deserializes_lowercase() {
        let settings: LoggerSettings = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(settings.level, LoggerLevel::Debug);
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(LoggerSettings::default().level, LoggerLevel::Info);
    }
}
