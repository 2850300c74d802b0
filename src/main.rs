//! ABIDE Fetcher CLI application
//!
//! Command-line interface for mirroring ABIDE I FreeSurfer structural data.
//! Features concurrent downloads, progress tracking, and a classified
//! per-file outcome report.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use abide_fetcher::cli::{handle_catalog, handle_fetch, Cli, Commands};
use abide_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("ABIDE Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    let Cli { global, command } = cli;
    match command {
        Commands::Fetch(args) => handle_fetch(args, &global).await,
        Commands::Catalog(args) => handle_catalog(args).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("abide_fetcher={}", cli.log_level()).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
