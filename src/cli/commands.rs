//! Command handlers for ABIDE Fetcher CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments and the core application: plan the run, drain the worker pool
//! with a progress display, and print the final report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::app::{
    load_subject_ids, ArchiveClient, CatalogConfig, FetchExecutor, FetchOutcome, FetcherConfig,
    FileCatalog, ResultStore, RunReport, TaskEvent, TaskSet, WorkerConfig, WorkerPool,
};
use crate::cli::{CatalogArgs, FetchArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::constants::archive;
use crate::errors::{AppError, Result};

/// Handle the fetch command
///
/// Orchestrates the complete run: metadata loading, catalog expansion, task
/// enumeration, the concurrent download phase, and the final report.
pub async fn handle_fetch(args: FetchArgs, global: &GlobalArgs) -> Result<()> {
    args.validate().map_err(AppError::generic)?;
    let start = Instant::now();

    let config = AppConfig::load(global.config.as_deref())?;

    let metadata_path = args.metadata_path();
    let subjects = load_subject_ids(&metadata_path)?;

    let catalog = FileCatalog::build(&CatalogConfig::default());
    info!("Catalog holds {} files per subject", catalog.len());

    let mut task_set = TaskSet::enumerate(&subjects, &catalog, &args.target_dir)?;
    if let Some(limit) = args.limit {
        if task_set.len() > limit {
            info!("Limiting run to {} of {} files", limit, task_set.len());
            task_set.truncate(limit);
        }
    }

    if !global.quiet {
        println!(
            "Downloading ABIDE I structural data to local directory '{}'.",
            args.target_dir.display()
        );
        println!(
            "{} files per subject, {} subject entries ({} without data), {} files in total.",
            catalog.len(),
            subjects.len(),
            task_set.excluded_subjects(),
            task_set.len()
        );
    }

    if args.dry_run {
        print_dry_run(&task_set);
        return Ok(());
    }

    let worker_count = args.workers.unwrap_or(config.fetch.workers);
    let skip_existing = !args.re_download && config.fetch.skip_existing;

    let base_url = args.base_url.as_deref().unwrap_or(archive::BASE_URL);
    let mut client_config = config.client_config();
    if let Some(secs) = args.timeout {
        client_config.request_timeout = Duration::from_secs(secs);
    }
    let client = Arc::new(ArchiveClient::new(base_url, client_config)?);

    let executor = Arc::new(FetchExecutor::new(
        client,
        FetcherConfig {
            local_root: args.target_dir.clone(),
            skip_existing,
        },
    ));
    let store = Arc::new(ResultStore::new());
    let pool = WorkerPool::new(
        WorkerConfig { worker_count },
        executor,
        Arc::clone(&store),
    )?;

    if !global.quiet {
        println!(
            "Downloading {} files in parallel using {} workers. skip_existing is set to {}.",
            task_set.len(),
            worker_count,
            skip_existing
        );
        if global.verbose {
            println!("Status codes: K=download okay, S=skipped, E=download error");
        }
        println!("----- Download Start -----");
    }

    let total_tasks = task_set.len();
    let excluded_subjects = task_set.excluded_subjects();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let progress = spawn_progress_consumer(event_rx, total_tasks, global.quiet, global.verbose);

    pool.run(task_set.into_tasks(), Some(event_tx)).await;
    let _ = progress.await;

    if !global.quiet {
        println!("----- Download End -----");
    }

    let snapshot = store.snapshot().await;
    let report = RunReport::new(
        &snapshot,
        total_tasks,
        excluded_subjects,
        worker_count,
        start.elapsed(),
    );
    println!("{}", report.render());
    println!(
        "Check local directory '{}' for downloaded files.",
        args.target_dir.display()
    );
    Ok(())
}

/// Handle the catalog command
pub async fn handle_catalog(args: CatalogArgs) -> Result<()> {
    let catalog = FileCatalog::build(&CatalogConfig::default());

    if args.count_only {
        println!("{}", catalog.len());
        return Ok(());
    }

    println!("Will download {} files per subject:", catalog.len());
    for (index, entry) in catalog.entries().iter().enumerate() {
        println!("    {}: {}", index + 1, entry);
    }
    Ok(())
}

fn print_dry_run(task_set: &TaskSet) {
    println!("Dry run - would handle {} files:", task_set.len());
    for (index, task) in task_set.tasks().iter().take(10).enumerate() {
        println!(
            "  {}. {}/{}",
            index + 1,
            task.subject(),
            task.relative_path()
        );
    }
    if task_set.len() > 10 {
        println!("  ... and {} more files", task_set.len() - 10);
    }
}

/// Consume per-task completion events: tick the progress bar and emit
/// per-file status lines (errors always, successes and skips when verbose)
fn spawn_progress_consumer(
    mut events: mpsc::UnboundedReceiver<TaskEvent>,
    total_tasks: usize,
    quiet: bool,
    verbose: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let bar = if quiet {
            None
        } else {
            let bar = ProgressBar::new(total_tasks as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {pos}/{len} files {msg}")
                    .unwrap(),
            );
            Some(bar)
        };

        while let Some(event) = events.recv().await {
            let show_line = match &event.outcome {
                FetchOutcome::Error { .. } => !quiet,
                _ => verbose,
            };
            if show_line {
                let line = format!("{}: {}", event.outcome.status_code(), event.url);
                match &bar {
                    Some(bar) => bar.println(line),
                    None => eprintln!("{}", line),
                }
            }
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    })
}
