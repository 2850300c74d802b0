//! Command-line argument parsing for ABIDE Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing a user-friendly interface for mirroring the archive and
//! inspecting the per-subject file catalog.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::constants::archive;

/// ABIDE Fetcher - mirror ABIDE I FreeSurfer structural data
#[derive(Parser, Debug)]
#[command(
    name = "abide_fetcher",
    version,
    about = "Download ABIDE I structural data preprocessed with the FreeSurfer pipeline",
    long_about = "A high-performance tool for mirroring ABIDE I structural neuroimaging data
from the FCP-INDI archive. Downloads many files in parallel, keeps existing
local files by default, and reports a classified outcome for every file."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose output (per-file status lines, info logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror the archive into a local directory
    Fetch(FetchArgs),

    /// Print the per-subject file catalog
    Catalog(CatalogArgs),
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Target download directory; will contain the subject directories.
    /// Must already exist.
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    /// Phenotypic metadata CSV with the FILE_ID column
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// How many files to download in parallel (defaults to 10)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Re-download files that already exist locally
    #[arg(short, long)]
    pub re_download: bool,

    /// Maximum number of files to handle (for testing)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show the download plan without fetching
    #[arg(long)]
    pub dry_run: bool,

    /// Archive root URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the catalog command
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Print only the number of catalog entries
    #[arg(long)]
    pub count_only: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl FetchArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("Number of workers must be greater than 0".to_string());
        }
        if self.timeout == Some(0) {
            return Err("Request timeout must be greater than 0 seconds".to_string());
        }
        Ok(())
    }

    /// Path of the phenotypic metadata CSV
    pub fn metadata_path(&self) -> PathBuf {
        self.metadata
            .clone()
            .unwrap_or_else(|| PathBuf::from(archive::DEFAULT_METADATA_CSV))
    }
}
