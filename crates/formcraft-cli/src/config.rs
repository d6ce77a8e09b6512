// File: src/config.rs
// Purpose: Configuration parsing from formcraft.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Colorize text output (default: true)
    #[serde(default = "default_true")]
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive; RUST_LOG takes precedence
    #[serde(default = "default_filter")]
    pub filter: String,
}

// Default values
fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load configuration from a formcraft.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Output format after applying a `--json` flag
    pub fn format(&self, json_flag: bool) -> OutputFormat {
        if json_flag {
            OutputFormat::Json
        } else {
            self.output.format
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [output]
            format = "json"

            [log]
            filter = "formcraft=debug"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color, "unset keys keep their defaults");
        assert_eq!(config.log.filter, "formcraft=debug");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/here/formcraft.toml").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_json_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(config.format(true), OutputFormat::Json);
        assert_eq!(config.format(false), OutputFormat::Text);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(toml::from_str::<Config>("[output]\nformat = \"yaml\"").is_err());
    }
}
