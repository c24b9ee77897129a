//! Logging setup for the identity admin console.
//!
//! Installs a `tracing-subscriber` formatter configured from the
//! environment. Library crates only emit `tracing` events; the binary calls
//! [`init`] once at startup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use idconsole_log::{LogConfig, init};
//!
//! let config = LogConfig::from_env().unwrap_or_default();
//! init(&config);
//! tracing::info!(base_url = "http://localhost:8080/api", "Console starting");
//! ```
//!
//! # Environment Variables
//!
//! - `IDCONSOLE_DEBUG=1` - Enable debug logging
//! - `IDCONSOLE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `IDCONSOLE_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `IDCONSOLE_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `IDCONSOLE_LOG_COLOR=1|0` - Enable/disable colors
//! - `RUST_LOG` - Full filter directives; overrides the level when set

use idconsole_config::{ConfigError, EnvLoader, Result};
use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// No logging at all
    Off,
}

impl Level {
    /// Get level from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Filter directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_directive())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human-oriented
    Pretty,
    /// Single line per event
    Compact,
    /// One JSON object per event
    Json,
}

impl Format {
    /// Get format from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Compact,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Create config from `IDCONSOLE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_loader(&EnvLoader::console())
    }

    /// Create config from an explicit loader.
    pub fn from_loader(loader: &EnvLoader) -> Result<Self> {
        let debug = loader.flag("DEBUG")?.unwrap_or(false);

        let level = match loader.load_var("LOG_LEVEL") {
            Ok(raw) => Level::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: "IDCONSOLE_LOG_LEVEL".to_string(),
                value: raw,
                expected: "trace, debug, info, warn, error or off",
            })?,
            Err(_) if debug => Level::Debug,
            Err(_) => Level::Info,
        };

        let format = match loader.load_var("LOG_FORMAT") {
            Ok(raw) => Format::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: "IDCONSOLE_LOG_FORMAT".to_string(),
                value: raw,
                expected: "pretty, compact or json",
            })?,
            Err(_) => Format::Compact,
        };

        let color = match loader.flag("LOG_COLOR")? {
            Some(color) => color,
            None => std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal(),
        };

        let timestamps = loader.flag("LOG_TIMESTAMPS")?.unwrap_or(true);

        Ok(Self {
            debug,
            level,
            format,
            color,
            timestamps,
        })
    }

    /// Filter for the subscriber. A non-empty `RUST_LOG` wins over `level`.
    pub fn env_filter(&self) -> EnvFilter {
        match std::env::var("RUST_LOG") {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_directive())),
            _ => EnvFilter::new(self.level.as_directive()),
        }
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(self.color)
            .with_target(true);

        match (self.format, self.timestamps) {
            (Format::Json, true) => layer.json().boxed(),
            (Format::Json, false) => layer.json().without_time().boxed(),
            (Format::Pretty, true) => layer.pretty().boxed(),
            (Format::Pretty, false) => layer.pretty().without_time().boxed(),
            (Format::Compact, true) => layer.compact().boxed(),
            (Format::Compact, false) => layer.compact().without_time().boxed(),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// stays in place.
pub fn init(config: &LogConfig) -> bool {
    tracing_subscriber::registry()
        .with(config.layer())
        .with(config.env_filter())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use idconsole_config::ENV_PREFIX;

    fn loader(vars: &[(&str, &str)]) -> EnvLoader {
        EnvLoader::from_vars(Some(ENV_PREFIX.to_string()), vars.iter().copied())
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("none"), Some(Level::Off));
        assert_eq!(Level::parse("loud"), None);
        assert!(Level::Trace < Level::Error);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("Json"), Some(Format::Json));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_loader(&loader(&[("IDCONSOLE_LOG_COLOR", "0")])).unwrap();
        assert_eq!(
            config,
            LogConfig {
                color: false,
                ..LogConfig::default()
            }
        );
    }

    #[test]
    fn test_debug_lowers_default_level() {
        let config = LogConfig::from_loader(&loader(&[("IDCONSOLE_DEBUG", "true")])).unwrap();
        assert!(config.debug);
        assert_eq!(config.level, Level::Debug);
    }

    #[test]
    fn test_explicit_level_beats_debug() {
        let config = LogConfig::from_loader(&loader(&[
            ("IDCONSOLE_DEBUG", "1"),
            ("IDCONSOLE_LOG_LEVEL", "warn"),
            ("IDCONSOLE_LOG_FORMAT", "json"),
            ("IDCONSOLE_LOG_TIMESTAMPS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.format, Format::Json);
        assert!(!config.timestamps);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(LogConfig::from_loader(&loader(&[("IDCONSOLE_LOG_LEVEL", "loud")])).is_err());
        assert!(LogConfig::from_loader(&loader(&[("IDCONSOLE_LOG_FORMAT", "xml")])).is_err());
        assert!(LogConfig::from_loader(&loader(&[("IDCONSOLE_DEBUG", "sometimes")])).is_err());
    }
}
