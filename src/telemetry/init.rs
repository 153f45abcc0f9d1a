//! Telemetry initialization.
//!
//! Provides configuration and initialization for the tracing subscriber.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default log level
    pub default_level: Level,
    /// Whether to include file and line numbers
    pub include_file_line: bool,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_file_line: false,
            include_target: false,
            ansi_colors: true,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for `--verbose` and `--debug` (shows every git call).
    pub fn development() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_file_line: true,
            include_target: true,
            ansi_colors: true,
        }
    }

    /// Pick a configuration from the CLI flags
    pub fn for_flags(verbose: bool, debug: bool) -> Self {
        if verbose || debug {
            Self::development()
        } else {
            Self::default()
        }
    }
}

/// Guard that keeps the telemetry subscriber active.
pub struct TelemetryGuard {
    #[allow(dead_code)]
    _private: (),
}

/// Initialize telemetry with the given configuration.
///
/// `RUST_LOG` directives are honoured on top of the configured level.
/// Returns a guard that must be kept alive for the duration of the
/// application.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into())
        .add_directive(format!("gshell={}", config.default_level).parse()?);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(TelemetryGuard { _private: () })
}
