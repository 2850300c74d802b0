//! ABIDE Fetcher Library
//!
//! A Rust library for mirroring ABIDE I structural neuroimaging data,
//! preprocessed with the FreeSurfer pipeline, from the FCP-INDI archive.
//! Provides efficient, concurrent downloading with skip-existing caching
//! and per-file outcome classification.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
