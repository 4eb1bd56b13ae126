//! Logging setup for the terminal client, using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; installing a subscriber is the binary's job.
//!
//! # Log Levels
//!
//! - `warn` (default): degraded storage, unmapped books, dropped corpus entries
//! - `info` (`-v`): session-level events
//! - `debug` (`-vv`): navigation, search statistics, annotation loading
//! - `trace` (`-vvv`): everything
//!
//! `RUST_LOG` overrides the verbosity flag entirely. Output always goes to stderr so
//! it never mixes with rendered chapters.

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Whether log lines on stderr should carry colour codes.
pub fn stderr_supports_ansi() -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    ansi_wanted(no_color, io::stderr().is_terminal())
}

fn ansi_wanted(no_color: bool, is_terminal: bool) -> bool {
    is_terminal && !no_color
}

/// Install the global subscriber. A second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn regardless of verbosity.
        EnvFilter::new(format!(
            "warn,selah={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(7).level, Level::TRACE);
    }

    #[test]
    fn colour_only_on_a_terminal_without_no_color() {
        assert!(ansi_wanted(false, true));
        assert!(!ansi_wanted(true, true));
        assert!(!ansi_wanted(false, false));
    }

    #[test]
    fn with_ansi_overrides_the_default() {
        assert!(LogConfig::from_verbosity(1).with_ansi);
        assert!(!LogConfig::from_verbosity(1).with_ansi(false).with_ansi);
    }
}
