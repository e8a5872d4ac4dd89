//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::{Config, LogFormat};
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Installs the default filters unless `RUST_LOG` already chose them.
///
/// An explicit `level` always wins. Without one, `RUST_LOG` is used as
/// given, and when that is unset too the crate logs at `info`.
fn apply_levels(builder: &mut env_logger::Builder, level: Option<LevelFilter>, rust_log_set: bool) {
    let level = match level {
        Some(level) => level,
        None if rust_log_set => return,
        None => LevelFilter::Info,
    };
    builder.filter_level(level);
    // sqlx logs every statement; keep it to slow-query warnings
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("recording_store", level);
}

/// Initializes the logger from the level and format in `config`.
pub fn init_logger(config: &Config) -> Result<(), InitializationError> {
    init_logger_with(
        config.log_level.clone().map(LevelFilter::from),
        config.log_format.clone(),
    )
}

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (colored, one line per record) and JSON lines for structured logging.
///
/// With `level` unset the `RUST_LOG` environment variable decides, falling
/// back to `info`. A given `level` overrides `RUST_LOG`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug recording_store list
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug recording_store list --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=recording_store::storage=debug recording_store schedules
/// ```
pub fn init_logger_with(
    level: Option<LevelFilter>,
    format: LogFormat,
) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    apply_levels(
        &mut builder,
        level,
        std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some(),
    );

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            // Colors only when stderr is a terminal
            if !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                colored::control::set_override(false);
            }
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {:>5} {} {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    colored_level,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
