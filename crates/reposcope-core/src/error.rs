//! Centralized error types for Reposcope.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Message shown next to the input field when a reference cannot be parsed.
pub const INVALID_REFERENCE_MESSAGE: &str = "Enter a valid URL";

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Repository reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Reference(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Errors produced while turning raw input into a repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The input matched none of the recognised reference shapes.
    #[error("Invalid repository reference format: {input:?}")]
    InvalidReferenceFormat { input: String },

    #[error("Repository reference field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Failed to build repository URL: {0}")]
    InvalidUrl(String),
}

impl ReferenceError {
    pub fn invalid_format(input: impl Into<String>) -> Self {
        ReferenceError::InvalidReferenceFormat {
            input: input.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ReferenceError::InvalidReferenceFormat { .. } | ReferenceError::EmptyField(_) => {
                INVALID_REFERENCE_MESSAGE
            }
            ReferenceError::InvalidUrl(_) => "Could not build a link for this repository.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Pass --config.",
            ConfigError::Read { .. } => "Configuration could not be read. Check file permissions.",
            ConfigError::Write { .. } => "Configuration could not be saved. Check file permissions.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
