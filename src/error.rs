//! Error types for arsenal operations.
//!
//! This module defines [`ArsenalError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-tool failures (missing binaries, timeouts, failed installs) are never
//!   errors: they are recorded in [`ProbeResult`](crate::verify::ProbeResult)
//!   and [`InstallOutcome`](crate::install::InstallOutcome) values
//! - Use `ArsenalError` for setup problems that stop the whole run
//! - Use `anyhow::Error` (via `ArsenalError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for arsenal operations.
#[derive(Debug, Error)]
pub enum ArsenalError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two catalog entries share a name.
    #[error("Duplicate tool '{name}' in catalog")]
    DuplicateTool { name: String },

    /// A `--category` filter matched nothing.
    #[error("No tools found for category: {category}")]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    /// A tool named on the command line is not in the catalog.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// Writing the verification report failed.
    #[error("Failed to save report to {path}: {message}")]
    ReportWriteFailed { path: PathBuf, message: String },

    /// The async runtime could not be started.
    #[error("Failed to start async runtime: {0}")]
    Runtime(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArsenalError {
    /// Process exit code for an error that ends the run.
    ///
    /// Configuration problems exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArsenalError::ConfigNotFound { .. }
            | ArsenalError::ConfigParseError { .. }
            | ArsenalError::ConfigValidationError { .. }
            | ArsenalError::DuplicateTool { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for arsenal operations.
pub type Result<T> = std::result::Result<T, ArsenalError>;
