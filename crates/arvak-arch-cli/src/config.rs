//! Configuration for the `arvak-arch` tool.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config` or `ARVAK_ARCH_CONFIG`)
//! 2. Environment variables with the `ARVAK_ARCH_` prefix
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Result output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Limits for expensive analyses
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// How command results are printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Result format: "table" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Pretty-print JSON results and written device files
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl OutputConfig {
    /// Whether results should be emitted as JSON.
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Limits for expensive analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Largest device on which line decomposition is attempted
    #[serde(default = "default_max_line_search_nodes")]
    pub max_line_search_nodes: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_line_search_nodes() -> usize {
    512
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_output_format(),
            pretty: default_true(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            max_line_search_nodes: default_max_line_search_nodes(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::Io(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: CliConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => CliConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `ARVAK_ARCH_*` environment variables into this configuration.
    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `get`. Keys that are absent, or numeric values
    /// that do not parse, leave the corresponding fields unchanged.
    fn merge_vars(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        // Logging
        if let Some(v) = get("ARVAK_ARCH_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("ARVAK_ARCH_LOG_FORMAT") {
            self.logging.format = v;
        }

        // Output
        if let Some(v) = get("ARVAK_ARCH_OUTPUT_FORMAT") {
            self.output.format = v;
        }
        if let Some(v) = get("ARVAK_ARCH_OUTPUT_PRETTY") {
            if let Ok(val) = v.parse() {
                self.output.pretty = val;
            }
        }

        // Analysis
        if let Some(v) = get("ARVAK_ARCH_MAX_LINE_SEARCH_NODES") {
            if let Ok(val) = v.parse() {
                self.analysis.max_line_search_nodes = val;
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Validation(format!("Invalid log level: {other}")));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!("Invalid log format: {other}")));
            }
        }

        match self.output.format.as_str() {
            "table" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid output format: {other}"
                )));
            }
        }

        if self.analysis.max_line_search_nodes == 0 {
            return Err(ConfigError::Validation(
                "max_line_search_nodes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
