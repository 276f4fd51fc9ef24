use std::path::Path;

use crate::{AppError, Config, ParserConfig};

/// Main application state and lifecycle manager
pub struct App {
    config: Config,
    initialized: bool,
}

impl App {
    /// Create a new application instance from the default config location
    pub fn new() -> Result<Self, AppError> {
        Ok(Self::with_config(Config::load()?))
    }

    /// Create an application instance from an explicit config file
    pub fn from_path(config_path: &Path) -> Result<Self, AppError> {
        Ok(Self::with_config(Config::load_from(config_path)?))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    /// Validate configuration and mark the application ready
    pub fn initialize(&mut self) -> Result<(), AppError> {
        self.config.ensure_valid()?;

        tracing::info!(
            segment_order = ?self.config.parser.segment_order,
            allow_empty_segments = self.config.parser.allow_empty_segments,
            "Application initialized successfully"
        );
        self.initialized = true;
        Ok(())
    }

    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down application");
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.config.parser
    }
}
