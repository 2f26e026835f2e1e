//! Tracing subscriber setup for hosts embedding the reconcilers.

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetrySettings;

/// Log file name used when `logDirectory` is set.
const LOG_FILE_NAME: &str = "draft-reconciler.log";

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter { filter: String, source: tracing_subscriber::filter::ParseError },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Parses `settings.filter` into an `EnvFilter`.
pub fn build_filter(settings: &TelemetrySettings) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&settings.filter).map_err(|source| TelemetryError::InvalidFilter {
        filter: settings.filter.clone(),
        source,
    })
}

/// Installs the global fmt subscriber.
///
/// Logs go to stderr, or to a non-blocking file writer under `log_directory`. In the
/// latter case the returned guard must be held until shutdown to flush buffered lines.
pub fn init(settings: &TelemetrySettings) -> Result<Option<WorkerGuard>, TelemetryError> {
    let filter = build_filter(settings)?;

    if let Some(directory) = &settings.log_directory {
        let appender = tracing_appender::rolling::never(directory, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| TelemetryError::Install(e.to_string()))?;
        return Ok(Some(guard));
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| TelemetryError::Install(e.to_string()))?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::level("info")]
    #[case::per_target("warn,draft_reconciler=debug")]
    fn build_filter_accepts_directives(#[case] filter: &str) {
        let settings = TelemetrySettings { filter: filter.to_string(), log_directory: None };

        assert_that!(build_filter(&settings).is_ok(), eq(true));
    }

    #[rstest]
    fn build_filter_rejects_unknown_level() {
        let settings =
            TelemetrySettings { filter: "draft_reconciler=loud".to_string(), log_directory: None };

        let result = build_filter(&settings);

        assert!(matches!(result, Err(TelemetryError::InvalidFilter { .. })));
    }
}
