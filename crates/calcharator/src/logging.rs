//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence; otherwise the level comes from `-v`/`-q`.
//! The TUI owns the terminal, so interactive runs only log when a log file
//! is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, Verbosity};
use crate::error::{AppError, AppResult};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The configured log file
    File,
    /// Standard error
    Stderr,
    /// Discarded
    None,
}

/// Chooses the sink for a run; `interactive` is true when the TUI will own
/// the terminal
#[must_use]
pub fn sink_for(config: &AppConfig, interactive: bool) -> LogSink {
    match (&config.log_file, interactive) {
        (Some(_), _) => LogSink::File,
        (None, false) => LogSink::Stderr,
        (None, true) => LogSink::None,
    }
}

/// Filter from `RUST_LOG`, falling back to the verbosity level
#[must_use]
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &AppConfig, interactive: bool) -> AppResult<()> {
    let sink = sink_for(config, interactive);

    let file_layer = match (&config.log_file, sink) {
        (Some(path), LogSink::File) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::logging(format!("cannot open {}: {e}", path.display())))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        _ => None,
    };

    let stderr_layer = (sink == LogSink::Stderr).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(build_filter(config.verbosity))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sink_interactive_without_file() {
        let config = AppConfig::new();
        assert_eq!(sink_for(&config, true), LogSink::None);
    }

    #[test]
    fn test_sink_batch_without_file() {
        let config = AppConfig::new();
        assert_eq!(sink_for(&config, false), LogSink::Stderr);
    }

    #[test]
    fn test_sink_file_wins() {
        let config = AppConfig::new().with_log_file(Some(PathBuf::from("calc.log")));
        assert_eq!(sink_for(&config, true), LogSink::File);
        assert_eq!(sink_for(&config, false), LogSink::File);
    }

    #[test]
    fn test_init_reports_unwritable_file() {
        let config =
            AppConfig::new().with_log_file(Some(PathBuf::from("/nonexistent-dir/calc/x.log")));
        let err = init(&config, true).unwrap_err();
        assert!(err.to_string().contains("Logging"));
    }
}
