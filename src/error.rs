//! Error types for extension gate operations.
//!
//! This module defines [`GateError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GateError` for conditions the host must handle distinctly
//! - Unmet requirements are never errors; they are reported through diagnostic sinks
//! - Failures raised by a protected callback travel as `anyhow::Error` untouched

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for extension gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// The deferred callback is missing or cannot be invoked.
    #[error("Invalid callback for extension '{extension}': {reason}")]
    InvalidCallback { extension: String, reason: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for extension gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
