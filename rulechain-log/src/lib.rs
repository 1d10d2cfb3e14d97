//! Logging setup for rulechain
//!
//! The validation engine emits `tracing` events. This crate installs the
//! subscriber that prints them, configured from `RULECHAIN_*` environment
//! variables.
//!
//! # Usage
//!
//! ```rust
//! // Reads RULECHAIN_DEBUG / RULECHAIN_LOG_LEVEL / RULECHAIN_LOG_FORMAT.
//! // Safe to call more than once.
//! rulechain_log::init();
//! rulechain_log::init();
//! ```
//!
//! # Environment Variables
//!
//! - `RULECHAIN_DEBUG=1` - Enable debug logging
//! - `RULECHAIN_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `RULECHAIN_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `RULECHAIN_LOG_COLOR=1|0` - Enable/disable colors
//! - `RULECHAIN_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `RULECHAIN_LOG_TARGET=1|0` - Include the event target
//!
//! `RUST_LOG`, when set, replaces the level with a full filter directive.

use once_cell::sync::OnceCell;
use std::env;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer};

pub const DEBUG_ENV_VAR: &str = "RULECHAIN_DEBUG";
pub const LEVEL_ENV_VAR: &str = "RULECHAIN_LOG_LEVEL";
pub const FORMAT_ENV_VAR: &str = "RULECHAIN_LOG_FORMAT";
pub const COLOR_ENV_VAR: &str = "RULECHAIN_LOG_COLOR";
pub const TIMESTAMPS_ENV_VAR: &str = "RULECHAIN_LOG_TIMESTAMPS";
pub const TARGET_ENV_VAR: &str = "RULECHAIN_LOG_TARGET";

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of events that get printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Level {
    /// Every evaluated directive
    Trace,
    /// Unknown rules and per-record summaries
    Debug,
    #[default]
    Info,
    /// Malformed parameters and unknown field references
    Warn,
    Error,
    /// No logging
    Off,
}

impl Level {
    /// Get level from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
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

    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// The `EnvFilter` directive for this level.
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
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
    /// JSON lines for structured logging
    Json,
}

impl Format {
    /// Get format from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pretty => "pretty",
            Format::Compact => "compact",
            Format::Json => "json",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Set once a subscriber from this crate is installed.
static INSTALLED: OnceCell<()> = OnceCell::new();

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
    /// Whether to include the event target
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Compact,
            color: false,
            timestamps: true,
            target: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| lookup(name).map(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let debug = flag(DEBUG_ENV_VAR).unwrap_or(false);

        let level = lookup(LEVEL_ENV_VAR)
            .and_then(|s| Level::from_str(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup(FORMAT_ENV_VAR)
            .and_then(|s| Format::from_str(&s))
            .unwrap_or_default();

        // Assume color unless NO_COLOR is set or there is no terminal
        let color = flag(COLOR_ENV_VAR)
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        let timestamps = flag(TIMESTAMPS_ENV_VAR).unwrap_or(true);
        let target = flag(TARGET_ENV_VAR).unwrap_or(true);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
            target,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable debug mode, lowering the level to at least `Debug`.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        if enabled && self.level > Level::Debug {
            self.level = Level::Debug;
        }
        self
    }

    /// `RUST_LOG` if it parses, otherwise the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }

    /// Install the global subscriber. Repeated calls are no-ops.
    pub fn try_init(&self) -> Result<(), TryInitError> {
        INSTALLED.get_or_try_init(|| install(self)).map(|_| ())
    }

    /// Like [`try_init`](Self::try_init), ignoring a subscriber installed
    /// elsewhere.
    pub fn init(&self) {
        let _ = self.try_init();
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer(config: &LogConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_target(config.target);

    match (config.format, config.timestamps) {
        (Format::Pretty, true) => layer.pretty().boxed(),
        (Format::Pretty, false) => layer.pretty().without_time().boxed(),
        (Format::Compact, true) => layer.compact().boxed(),
        (Format::Compact, false) => layer.compact().without_time().boxed(),
        #[cfg(feature = "json")]
        (Format::Json, true) => layer.json().boxed(),
        #[cfg(feature = "json")]
        (Format::Json, false) => layer.json().without_time().boxed(),
        // Without the json feature, fall back to single-line output
        #[cfg(not(feature = "json"))]
        (Format::Json, true) => layer.compact().boxed(),
        #[cfg(not(feature = "json"))]
        (Format::Json, false) => layer.compact().without_time().boxed(),
    }
}

fn install(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(fmt_layer(config))
        .with(config.env_filter())
        .try_init()
}

// ============================================================================
// Public API
// ============================================================================

/// Initialize logging from the environment. Safe to call repeatedly.
pub fn init() {
    LogConfig::from_env().init();
}

/// Initialize logging from the environment, reporting a subscriber
/// installed by someone else.
pub fn try_init() -> Result<(), TryInitError> {
    LogConfig::from_env().try_init()
}

/// Whether a subscriber from this crate has been installed.
pub fn is_initialized() -> bool {
    INSTALLED.get().is_some()
}

// ============================================================================
// Tests
// ============================================================================
