// Validator configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable read by [`ValidatorConfig::from_env`].
pub const MODE_ENV_VAR: &str = "RULECHAIN_VALIDATION_MODE";

/// How many messages a failing field reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Stop at the first failing rule; one message per field
    #[serde(alias = "fail-fast", alias = "first")]
    FailFast,
    /// Run every rule; all messages per field
    #[default]
    #[serde(alias = "all")]
    Accumulate,
}

impl ErrorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorMode::FailFast => "fail_fast",
            ErrorMode::Accumulate => "accumulate",
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized error-mode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(pub String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown validation mode '{}' (expected fail_fast or accumulate)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for ErrorMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail_fast" | "fail-fast" | "failfast" | "first" => Ok(ErrorMode::FailFast),
            "accumulate" | "all" => Ok(ErrorMode::Accumulate),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub mode: ErrorMode,
}

impl ValidatorConfig {
    pub fn new(mode: ErrorMode) -> Self {
        Self { mode }
    }

    pub fn fail_fast() -> Self {
        Self::new(ErrorMode::FailFast)
    }

    pub fn accumulate() -> Self {
        Self::new(ErrorMode::Accumulate)
    }

    /// Read `RULECHAIN_VALIDATION_MODE`, falling back to the default mode
    /// when unset or unrecognized.
    pub fn from_env() -> Self {
        let mode = env::var(MODE_ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self { mode }
    }
}
