//! Logging configuration and setup
//!
//! This module provides logging initialization and the structured log events
//! emitted by the lookup engine. The engine treats logging as fire-and-forget.

use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{LookupError, Result};

/// Initialize logging based on configuration
///
/// When a log file is configured the returned guard must be kept alive for
/// the lifetime of the process, otherwise buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LookupError::Logging(e.to_string()))?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    let guard = match config.file_path.as_deref() {
        Some(file_path) => {
            let path = Path::new(file_path);
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "i18n-lookup.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            registry
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
                .try_init()
                .map_err(|e| LookupError::Logging(e.to_string()))?;
            Some(guard)
        }
        None => {
            registry
                .try_init()
                .map_err(|e| LookupError::Logging(e.to_string()))?;
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a rejected locale change
pub fn log_locale_rejected(requested: &str, current: &str) {
    warn!(
        requested = requested,
        current = current,
        "Locale change rejected: locale is not supported"
    );
}

/// Log an identifier that no tier could resolve
pub fn log_missing_identifier(identifier: &str, locale: &str) {
    debug!(
        identifier = identifier,
        locale = locale,
        "Identifier not found in any locale tier"
    );
}

/// Log a value that could not be turned into a display string
pub fn log_malformed_plural(identifier: &str, reason: &str) {
    warn!(
        identifier = identifier,
        reason = reason,
        "Malformed pluralization record"
    );
}

/// Log a failed namespace load
pub fn log_load_failure(locale: &str, namespace: &str, error: &LookupError) {
    error!(
        locale = locale,
        namespace = namespace,
        severity = %error.severity(),
        recoverable = error.is_recoverable(),
        error = %error,
        "Failed to load localization tree"
    );
}

/// Log a successfully loaded namespace
pub fn log_namespace_loaded(locale: &str, namespace: &str, key_count: usize) {
    debug!(
        locale = locale,
        namespace = namespace,
        key_count = key_count,
        "Loaded localization tree"
    );
}
