use rolling_file::*;
use std::path::PathBuf;
use substrate_net_api_config::LogConfig;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Parse a level directive such as `info` or `debug,substrate_net_api=trace`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Install the global tracing subscriber described by `config`.
///
/// Console output is always on. With `write` set, the same events are also
/// written to `<write_path>/logs.log`, rotated by size:
/// - Current: logs.log
/// - After rotation: logs.log.1, logs.log.2, etc.
/// - Keeps up to `write_max_files` files including the current one
///
/// The returned guard flushes the file writer on drop and must be held for
/// as long as logging is needed.
pub fn init_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(&config.level)?;

    let (file_writer, guard) = if config.write {
        std::fs::create_dir_all(&config.write_path)?;

        let log_file_path = PathBuf::from(&config.write_path).join("logs.log");
        // write_max_files counts the current file
        let rotated_files_count = config.write_max_files.saturating_sub(1);
        let file_appender = BasicRollingFileAppender::new(
            log_file_path,
            RollingConditionBasic::new().max_size(config.write_max_file_size),
            rotated_files_count,
        )?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking), Some(guard))
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        let console_layer = fmt::layer().json();
        let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));

        registry.with(console_layer).with(file_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!config.strip_ansi);

        let file_layer = file_writer.map(|writer| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(writer)
        });

        registry.with(console_layer).with(file_layer).try_init()?;
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("warn,substrate_net_api=trace").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let err = build_filter("substrate=loud").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLogLevel { .. }));
        assert!(err.to_string().contains("substrate=loud"));
    }

    #[test]
    fn test_init_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            level: "info".to_string(),
            write: true,
            write_path: dir.path().join("nested").display().to_string(),
            ..Default::default()
        };

        // The directory exists even if a global subscriber was already set.
        let result = init_with_config(&config);
        assert!(dir.path().join("nested").is_dir());
        match result {
            Ok(guard) => assert!(guard.is_some()),
            Err(err) => assert!(matches!(err, LoggingError::AlreadyInitialized(_))),
        }
    }
}
