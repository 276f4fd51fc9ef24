pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, ConfigValidationError, GitHubConfig, ParserConfig, SegmentOrder, ValidationResult,
};
pub use error::{AppError, ConfigError, ReferenceError, INVALID_REFERENCE_MESSAGE};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }

    tracing::info!("Reposcope core initialized");
    Ok(())
}
