//! Configuration management for Linear Kanban
//!
//! Values are resolved from, in increasing precedence:
//! 1. Built-in defaults
//! 2. Environment variables (`LINEAR_API_KEY`, `LINEAR_KANBAN_*`)
//! 3. An optional `linear-kanban.yaml` file
//!
//! The API key is only ever read from the environment.

use crate::common::env_loader::EnvLoader;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Linear GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

/// Default file name for MCP-mode logs, relative to the log directory
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// Name of the optional YAML configuration file
pub const CONFIG_FILE_NAME: &str = "linear-kanban.yaml";

/// Environment variable holding the Linear personal API key
pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// The invalid value
        value: String,
        /// How to fix it
        hint: String,
    },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Linear personal API key, `None` when unset or blank
    pub api_key: Option<String>,
    /// GraphQL endpoint (default: [`DEFAULT_API_URL`])
    pub api_url: String,
    /// MCP-mode log file name inside `~/.linear-kanban` (default: [`DEFAULT_LOG_FILE`])
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration from defaults, environment and YAML file
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env_vars();

        match YamlConfig::load_or_default() {
            Ok(yaml_config) => yaml_config.apply_to_config(&mut config),
            Err(e) => {
                tracing::warn!(
                    "Failed to load YAML configuration, falling back to env vars and defaults: {}",
                    e
                );
            }
        }

        if let Err(e) = config.validate() {
            tracing::warn!("{}. Using default API URL.", e);
            config.api_url = DEFAULT_API_URL.to_string();
        }

        config
    }

    fn apply_env_vars(&mut self) {
        self.api_key = EnvLoader::new("LINEAR").load_non_empty("API_KEY");

        let loader = EnvLoader::new("LINEAR_KANBAN");
        self.api_url = loader.load_string("API_URL", &self.api_url);
        self.log_file = loader.load_string("LOG_FILE", &self.log_file);
    }

    /// True when an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the current configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_api_url(&self.api_url)?;
        validate_log_file(&self.log_file)
    }

    /// Find the linear-kanban.yaml configuration file
    ///
    /// Search order:
    /// 1. Current working directory: `linear-kanban.yaml`
    /// 2. `~/.config/linear-kanban/linear-kanban.yaml`
    /// 3. `~/linear-kanban.yaml`
    pub fn find_yaml_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Some(home_dir) = dirs::home_dir() {
            search_paths.push(
                home_dir
                    .join(".config")
                    .join("linear-kanban")
                    .join(CONFIG_FILE_NAME),
            );
            search_paths.push(home_dir.join(CONFIG_FILE_NAME));
        }

        let found = search_paths.iter().find_map(|p| Self::check_config_file(p));
        match &found {
            Some(path) => tracing::debug!("Found configuration file: {:?}", path),
            None => tracing::debug!("No {} found in any search location", CONFIG_FILE_NAME),
        }
        found
    }

    /// Check if a configuration file exists and is readable
    pub fn check_config_file(config_path: &Path) -> Option<PathBuf> {
        match config_path.try_exists() {
            Ok(true) if config_path.is_file() => match std::fs::File::open(config_path) {
                Ok(_) => Some(config_path.to_path_buf()),
                Err(e) => {
                    tracing::warn!(
                        "Configuration file {:?} exists but cannot be read: {}",
                        config_path,
                        e
                    );
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(
                    "Error checking for configuration file {:?}: {}",
                    config_path,
                    e
                );
                None
            }
        }
    }

    /// Example YAML configuration file content
    pub fn example_yaml_config() -> &'static str {
        r#"# linear-kanban.yaml
# The API key is read from LINEAR_API_KEY only.

# GraphQL endpoint
api_url: "https://api.linear.app/graphql"

# Log file name inside ~/.linear-kanban when running as an MCP server
log_file: "mcp.log"
"#
    }
}

fn validate_api_url(api_url: &str) -> Result<(), ConfigError> {
    if api_url.starts_with("https://") || api_url.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: "api_url".to_string(),
            value: api_url.to_string(),
            hint: "api_url must be an http:// or https:// URL".to_string(),
        })
    }
}

fn validate_log_file(log_file: &str) -> Result<(), ConfigError> {
    if log_file.trim().is_empty() || log_file.contains('/') || log_file.contains('\\') {
        return Err(ConfigError::InvalidValue {
            field: "log_file".to_string(),
            value: log_file.to_string(),
            hint: "log_file must be a plain, non-empty file name".to_string(),
        });
    }
    Ok(())
}

/// Configuration loaded from linear-kanban.yaml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YamlConfig {
    /// GraphQL endpoint override
    pub api_url: Option<String>,
    /// MCP-mode log file name override
    pub log_file: Option<String>,
}

impl YamlConfig {
    /// Apply YAML values over an existing Config
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(ref api_url) = self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(ref log_file) = self.log_file {
            config.log_file = log_file.clone();
        }
    }

    /// Load YAML configuration from a file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading YAML configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: YamlConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load YAML configuration, returning default if no file is found
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Config::find_yaml_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the values present in the file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref api_url) = self.api_url {
            validate_api_url(api_url)?;
        }
        if let Some(ref log_file) = self.log_file {
            validate_log_file(log_file)?;
        }
        Ok(())
    }
}
