//! Application constants for ABIDE Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Remote archive layout and metadata conventions
pub mod archive {
    /// FCP-INDI S3 prefix holding the FreeSurfer 5.1 pipeline outputs
    pub const BASE_URL: &str =
        "https://s3.amazonaws.com/fcp-indi/data/Projects/ABIDE_Initiative/Outputs/freesurfer/5.1";

    /// FILE_ID value marking a phenotypic entry with no released imaging data
    pub const NO_DATA_SENTINEL: &str = "no_filename";

    /// Default phenotypic metadata file name
    pub const DEFAULT_METADATA_CSV: &str = "Phenotypic_V1_0b_preprocessed1.csv";

    /// Metadata column holding the subject directory names
    pub const FILE_ID_COLUMN: &str = "FILE_ID";
}

/// FreeSurfer subject directory layout
pub mod catalog {
    /// Two-character hemisphere codes, left before right
    pub const HEMISPHERES: [&str; 2] = ["lh", "rh"];

    /// Smoothing kernel widths (mm FWHM) available for fsaverage maps
    pub const SMOOTHING_WIDTHS: [u8; 6] = [0, 5, 10, 15, 20, 25];

    /// Subdirectory holding surface meshes and morphometry data
    pub const SURF_DIR: &str = "surf";

    /// Subdirectory holding atlas and segmentation statistics
    pub const STATS_DIR: &str = "stats";

    /// Subdirectory holding parcellations and cortex labels
    pub const LABEL_DIR: &str = "label";

    /// Subdirectory holding volume files
    pub const MRI_DIR: &str = "mri";

    /// Subdirectory holding transformation matrices
    pub const TRANSFORMS_DIR: &str = "mri/transforms";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "ABIDE-Fetcher/0.1.0 (Neuroimaging Research Tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 25;
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of download workers
    pub const DEFAULT_WORKER_COUNT: usize = 10;

    /// Maximum recommended concurrent workers
    pub const MAX_WORKER_COUNT: usize = 32;
}

/// Logging and debugging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use archive::{BASE_URL as ARCHIVE_BASE_URL, NO_DATA_SENTINEL};
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use workers::DEFAULT_WORKER_COUNT;
