//! Logging bootstrap for the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `SIDETRACK_LOG`: Filter directive (like `RUST_LOG`), e.g., `sidetrack=debug`
//! - `SIDETRACK_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `SIDETRACK_LOG_DIR`: Override the log directory when file logging is enabled
//!
//! File logging (daily rotation under `~/.sidetrack/logs/`) is switched on
//! via the `[logging]` section of `sidetrack.toml`.

use crate::config::LoggingSettings;
use crate::error::Error;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

fn build_env_filter(settings: &LoggingSettings) -> EnvFilter {
    let filter = env::var("SIDETRACK_LOG")
        .ok()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| settings.level.clone());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

fn detect_format(settings: &LoggingSettings) -> LogFormat {
    if let Ok(fmt_str) = env::var("SIDETRACK_LOG_FORMAT")
        && let Some(fmt) = LogFormat::parse_str(&fmt_str)
    {
        return fmt;
    }

    if let Some(fmt) = LogFormat::parse_str(&settings.format) {
        return fmt;
    }

    if atty::is(atty::Stream::Stderr) { LogFormat::Pretty } else { LogFormat::Compact }
}

fn log_dir() -> Result<PathBuf, Error> {
    if let Ok(custom_dir) = env::var("SIDETRACK_LOG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;

    Ok(PathBuf::from(home).join(".sidetrack").join("logs"))
}

/// Initialize the global tracing subscriber.
///
/// Note: a TUI owns the terminal, so stderr output is only visible after
/// exit or when redirected; file logging is the practical choice while the
/// interface is running.
pub fn init_logging(settings: Option<LoggingSettings>) -> Result<(), Error> {
    let settings = settings.unwrap_or_default();
    let env_filter = build_env_filter(&settings);
    let format = detect_format(&settings);

    let registry = Registry::default().with(env_filter);

    if settings.file {
        let dir = log_dir()?;
        std::fs::create_dir_all(&dir).map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;

        let file_appender = tracing_appender::rolling::daily(dir, "sidetrack.log");
        let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

        match format {
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
            LogFormat::Json => {
                registry
                    .with(fmt::layer().json().with_writer(io::stderr))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
            LogFormat::Compact => {
                registry
                    .with(fmt::layer().compact().with_writer(io::stderr))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
        }
    } else {
        match format {
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
                    .init();
            }
            LogFormat::Json => {
                registry.with(fmt::layer().json().with_writer(io::stderr)).init();
            }
            LogFormat::Compact => {
                registry.with(fmt::layer().compact().with_writer(io::stderr)).init();
            }
        }
    }

    Ok(())
}
