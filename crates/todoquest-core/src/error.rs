//! Core error types for todoquest-core.
//!
//! Every failure in this library is recoverable. The application layer
//! degrades to a no-op (task not added, voice button does nothing) rather
//! than surfacing a fault to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for todoquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before it reached the store (e.g. blank task text).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation referenced a task id that is not in the store.
    #[error("No task with id '{0}'")]
    NotFound(String),

    /// An optional host capability (e.g. speech capture) is absent.
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
