//! Error types for ABIDE Fetcher
//!
//! This module defines the error types for all components of the application.
//! Fatal, pre-run conditions are real errors; per-task fetch failures are
//! classified into [`crate::app::models::FetchOutcome`] values by the executor
//! and never propagate as errors across the worker pool.

use std::path::PathBuf;

use thiserror::Error;

/// Phenotypic metadata loading errors
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Metadata file not found
    #[error("Metadata file not found: {path}")]
    NotFound { path: PathBuf },

    /// CSV parsing error
    #[error("CSV parsing error in metadata file")]
    Csv(#[from] csv::Error),

    /// Required column missing from the header row
    #[error("Metadata file has no '{column}' column")]
    MissingColumn { column: String },

    /// I/O error reading the metadata file
    #[error("I/O error reading metadata file")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
///
/// All of these are fatal and abort the run before any task executes.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The local mirror root must be created by the user up front
    #[error("Local mirror directory '{path}' does not exist, please create it first")]
    LocalRootMissing { path: PathBuf },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid archive base URL
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// I/O error reading configuration
    #[error("I/O error reading configuration")]
    Io(#[from] std::io::Error),
}

/// Errors raised while issuing a single HTTP fetch
///
/// These stay inside the fetch executor, which folds them into a classified
/// per-task outcome. They are never surfaced to the pool or the caller.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP transport failure (DNS, connect, timeout, reset)
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// I/O error writing the local mirror file
    #[error("File I/O error")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any fatal error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Metadata error
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Metadata(_) => "metadata",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Metadata result type alias
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;
