//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `log_level` from the configuration (`TASKER_LOG_LEVEL` or `tasker.toml`)
//! 3. default to `warn`

use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Installs the global subscriber. Call once, at startup.
pub fn init_logging(cli_level: Option<LogLevel>, config_level: Option<&str>) {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => config_level
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::WARN),
    };

    // Logs go to stderr so that stdout stays reserved for command output.
    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
