//! Structured logging with tracing
//!
//! Installs the global subscriber: an `EnvFilter` (the `ATS_LOG` variable
//! overrides the configured level), plain or JSON formatting and an
//! optional daily-rolling file sink.

use std::path::{Path, PathBuf};

use ats_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::{LOG_ENV_VAR, LOG_FILE_PREFIX};

/// Initialize logging with the provided configuration
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_deref().map(|path| {
        let (dir, prefix) = log_file_location(path);
        tracing_appender::rolling::daily(dir, prefix)
    });

    // Console output goes to stderr so stdout stays machine-readable.
    // Formatter types differ, so each combination gets its own branch
    let installed = if config.json_format {
        let console = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(console).with(file).try_init()
        } else {
            registry.with(console).try_init()
        }
    } else {
        let console = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(console).with(file).try_init()
        } else {
            registry.with(console).try_init()
        }
    };
    installed.map_err(|e| Error::configuration_with_source("Failed to install logger", e))?;

    info!(%level, json = config.json_format, "Logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}

/// Directory and prefix the rolling appender writes to
pub fn log_file_location(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let prefix = path
        .file_stem()
        .map_or_else(|| LOG_FILE_PREFIX.to_string(), |s| s.to_string_lossy().into_owned());
    (dir, prefix)
}
