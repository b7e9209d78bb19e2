//! Core error types for violetas-core.
//!
//! Failing to form breakout groups is not an error: the partitioner reports
//! it as an empty result. The types here cover configuration I/O and input
//! rejected at the host boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::roster::Pool;

/// Core error type for violetas-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date-picker style input that could not be parsed
    #[error("Invalid timestamp '{input}': expected YYYY-MM-DDTHH:MM")]
    InvalidTimestamp { input: String },

    /// Attendee names must contain something other than whitespace
    #[error("Attendee name must not be empty")]
    EmptyName,

    /// A name may only live in one pool at a time
    #[error("'{name}' is already listed under {pool}")]
    MemberInOtherPool { name: String, pool: Pool },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
