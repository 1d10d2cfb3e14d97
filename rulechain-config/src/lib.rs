// Settings and schema loading for rulechain

pub mod env;
pub mod error;
pub mod loader;

pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use rulechain_validation::{ErrorMode, Schema, ValidatorConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Keys understood in environment variables and `.env` files, relative to
/// the `RULECHAIN_` prefix.
pub const VALIDATION_MODE_KEY: &str = "validation_mode";
pub const LOG_LEVEL_KEY: &str = "log_level";
pub const LOG_FORMAT_KEY: &str = "log_format";

/// Process-level settings.
///
/// ```toml
/// log_level = "debug"
/// log_format = "compact"
///
/// [validation]
/// mode = "fail_fast"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub validation: ValidatorConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<String>,
}

impl Settings {
    /// Defaults overridden by `RULECHAIN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_env(&EnvLoader::rulechain())?;
        Ok(settings)
    }

    /// Read a JSON, TOML or `.env` settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;

        match loader.format() {
            FileFormat::Env => {
                let value = loader.load_file(path)?;
                let vars = value
                    .as_object()
                    .into_iter()
                    .flatten()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())));

                let mut settings = Self::default();
                settings.apply_vars(&EnvLoader::rulechain().collect(vars))?;
                Ok(settings)
            }
            _ => loader.load_as(path),
        }
    }

    /// File (when given) first, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(&EnvLoader::rulechain())?;
        Ok(settings)
    }

    /// Load a `.env` file into the process environment, then [`load`](Self::load).
    ///
    /// A missing `.env` in the working directory is not an error.
    pub fn load_with_dotenv(path: Option<&Path>, dotenv: Option<&Path>) -> Result<Self> {
        match dotenv {
            Some(dotenv) => {
                dotenvy::from_path(dotenv).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::load(path)
    }

    pub fn apply_env(&mut self, loader: &EnvLoader) -> Result<()> {
        let vars = loader.load()?;
        self.apply_vars(&vars)
    }

    /// Apply prefix-free, lowercase keys such as `validation_mode`.
    pub fn apply_vars(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(mode) = vars.get(VALIDATION_MODE_KEY) {
            let mode = mode
                .parse::<ErrorMode>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: EnvLoader::rulechain().full_key(VALIDATION_MODE_KEY),
                    reason: e.to_string(),
                })?;
            self.validation.mode = mode;
        }
        if let Some(level) = vars.get(LOG_LEVEL_KEY) {
            self.log_level = Some(level.clone());
        }
        if let Some(format) = vars.get(LOG_FORMAT_KEY) {
            self.log_format = Some(format.clone());
        }
        Ok(())
    }

    pub fn mode(&self) -> ErrorMode {
        self.validation.mode
    }
}

/// Read a [`Schema`] from a JSON or TOML file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let loader = ConfigLoader::auto(path)?;

    if loader.format() == FileFormat::Env {
        return Err(ConfigError::LoadError(format!(
            "Schemas cannot be read from .env files: {}",
            path.display()
        )));
    }

    loader.load_as(path)
}

/// Parse a [`Schema`] from JSON or TOML text.
pub fn parse_schema(content: &str, format: FileFormat) -> Result<Schema> {
    ConfigLoader::new(format).parse_as(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.mode(), ErrorMode::Accumulate);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn test_apply_vars() {
        let mut settings = Settings::default();
        settings
            .apply_vars(&vars(&[("validation_mode", "first"), ("log_level", "debug")]))
            .unwrap();

        assert_eq!(settings.mode(), ErrorMode::FailFast);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.log_format, None);
    }

    #[test]
    fn test_apply_vars_rejects_bad_mode() {
        let mut settings = Settings::default();
        let err = settings
            .apply_vars(&vars(&[("validation_mode", "sometimes")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "RULECHAIN_VALIDATION_MODE"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_settings_from_toml_text() {
        let settings: Settings = ConfigLoader::new(FileFormat::Toml)
            .parse_as("log_format = \"json\"\n[validation]\nmode = \"fail-fast\"\n")
            .unwrap();

        assert_eq!(settings.mode(), ErrorMode::FailFast);
        assert_eq!(settings.log_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_parse_schema_json() {
        let schema = parse_schema(
            r#"{"fields": [{"name": "email", "rules": "required|email"}, {"name": "nick"}]}"#,
            FileFormat::Json,
        )
        .unwrap();

        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].rules, "required|email");
        assert_eq!(schema.fields[1].rules, "");
    }
}
