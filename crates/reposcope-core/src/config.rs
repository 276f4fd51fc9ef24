use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Repository reference parsing
    #[serde(default)]
    pub parser: ParserConfig,

    /// GitHub link settings
    #[serde(default)]
    pub github: GitHubConfig,
}

/// Which path segment of a reference is read as the repository name.
///
/// `RepositoryFirst` reads `a/b` as repository `a`, owner `b`. This is the
/// mapping downstream analysis has always received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOrder {
    #[default]
    RepositoryFirst,
    OwnerFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ParserConfig {
    #[serde(default)]
    pub segment_order: SegmentOrder,

    /// Accept references whose owner or repository segment is empty (e.g. `"/"`)
    #[serde(default)]
    pub allow_empty_segments: bool,
}

/// Base URLs used when deriving links from a parsed reference.
/// Nothing is fetched from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_web_base_url() -> String {
    "https://github.com".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            web_base_url: default_web_base_url(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            tracing::info!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Read {
            path: config_path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Fail on validation errors, log warnings.
    ///
    /// Returns the full ValidationResult so callers can surface warnings too.
    pub fn ensure_valid(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(
            &self.github.web_base_url,
            "github.web_base_url",
            &mut result,
        );
        self.validate_url(
            &self.github.api_base_url,
            "github.api_base_url",
            &mut result,
        );

        if self.parser.allow_empty_segments {
            result.add_warning(
                "parser.allow_empty_segments",
                "References with an empty owner or repository will be accepted",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.query().is_some() || url.fragment().is_some() {
                    result.add_warning(field_name, "Query and fragment are ignored");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_error = |message: String| ConfigError::Write {
            path: config_path.display().to_string(),
            message,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;

        std::fs::write(config_path, contents).map_err(|e| write_error(e.to_string()))
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("reposcope");

        Ok(config_dir.join("config.toml"))
    }
}
