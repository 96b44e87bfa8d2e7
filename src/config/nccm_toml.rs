//! Parsing and validation for nccm.toml configuration files

use crate::error::ConfigError;
use crate::types::{Severity, Triangle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up next to the project file
pub const CONFIG_FILE_NAME: &str = "nccm.toml";

/// Main configuration struct for nccm.toml
///
/// Every section is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Matrix layout
    #[serde(default)]
    pub matrix: MatrixConfig,

    /// Generated rule settings
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `nccm.toml` from `dir` if it exists, defaults otherwise
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("{} not found, using defaults", path.display());
            return Ok(Config::default());
        }
        log::debug!("loading {}", path.display());
        Self::load(&path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(version) = &self.matrix.version
            && version != "1"
        {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                version
            )));
        }
        Ok(())
    }
}

/// Matrix section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    /// Configuration version (must be "1" when given)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Editable half of the matrix
    #[serde(default)]
    pub triangle: Triangle,
}

/// Rules section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Severity written into every generated rule
    #[serde(default)]
    pub severity: Severity,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable grid
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
[matrix]
version = "1"
triangle = "lower"

[rules]
severity = "warning"

[output]
format = "jsonl"
color = "never"
"#;

    #[test]
    fn test_full_config_parsing() {
        let config = Config::parse(FULL_CONFIG).unwrap();

        assert_eq!(config.matrix.triangle, Triangle::Lower);
        assert_eq!(config.rules.severity, Severity::Warning);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.output.color, ColorOption::Never);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matrix.triangle, Triangle::Upper);
        assert_eq!(config.rules.severity, Severity::Error);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::parse("[matrix]\ndiagonal = false\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_severity_rejected() {
        let result = Config::parse("[rules]\nseverity = \"fatal\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = Config::parse("[matrix]\nversion = \"2\"\n").unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration version"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_with_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[rules]\nseverity = \"ignore\"\n").unwrap();

        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.rules.severity, Severity::Ignore);
    }
}
