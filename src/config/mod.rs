//! Configuration management for apsh
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration file (TOML format, `~/.apsh/config.toml` by default)
//! - Command-line arguments (applied on top by the CLI layer)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host shell configuration
    pub shell: ShellConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Completion configuration
    pub completion: CompletionConfig,

    /// History configuration
    pub history: HistoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Host shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell program to spawn for passthrough lines
    #[serde(default = "default_shell_program")]
    pub program: String,

    /// Arguments placed before the passthrough line
    #[serde(default = "default_shell_args")]
    pub args: Vec<String>,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Maximum number of suggestions shown in the completion menu
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

/// Completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Command prefix manifest scripts are completed behind
    #[serde(default = "default_script_prefix")]
    pub script_prefix: String,

    /// Discover functions and aliases from the shell profile at startup
    #[serde(default = "default_profile_discovery")]
    pub profile_discovery: bool,

    /// Extra keywords offered alongside the built-in tables
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_shell_program() -> String {
    if cfg!(windows) {
        "powershell".to_string()
    } else {
        "pwsh".to_string()
    }
}

fn default_shell_args() -> Vec<String> {
    vec![
        "-NoLogo".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
    ]
}

fn default_color_output() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    10
}

fn default_script_prefix() -> String {
    "npm run".to_string()
}

fn default_profile_discovery() -> bool {
    true
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".apsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
            args: default_shell_args(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            script_prefix: default_script_prefix(),
            profile_discovery: default_profile_discovery(),
            extra_keywords: Vec::new(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// A missing file at the default location yields the defaults; a
    /// missing file at an explicitly given path is an error.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|_| {
            ConfigError::FileNotFound(path.as_ref().display().to_string())
        })?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional explicit path
    ///
    /// # Arguments
    /// * `path` - Explicit config path from the CLI, if any
    ///
    /// # Returns
    /// * `Result<Config>` - Merged configuration or error
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".apsh")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.shell.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "shell.program".to_string(),
                value: self.shell.program.clone(),
            }
            .into());
        }
        if self.display.max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.max_suggestions".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.completion.script_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "completion.script_prefix".to_string(),
                value: self.completion.script_prefix.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Returns
    /// * `Result<String>` - TOML text or error
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.shell.program.is_empty());
        assert_eq!(config.completion.script_prefix, "npm run");
        assert!(config.display.color_output);
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_parse_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[display]\ncolor_output = false\n\n[completion]\nscript_prefix = \"yarn run\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.display.color_output);
        assert_eq!(config.completion.script_prefix, "yarn run");
        // Untouched sections keep their defaults.
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Config::from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_shell_program() {
        let mut config = Config::default();
        config.shell.program = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_suggestions() {
        let mut config = Config::default();
        config.display.max_suggestions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.shell.program, config.shell.program);
        assert_eq!(parsed.logging.level, config.logging.level);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
