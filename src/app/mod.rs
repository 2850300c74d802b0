//! Core application logic for ABIDE Fetcher
//!
//! This module contains the main application components: the per-subject
//! file catalog, phenotypic metadata loading, task enumeration, the HTTP
//! client and fetch executor, the worker pool, and result aggregation and
//! reporting.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use abide_fetcher::app::{
//!     ArchiveClient, CatalogConfig, ClientConfig, FetchExecutor, FetcherConfig, FileCatalog,
//!     ResultStore, SubjectId, TaskSet, WorkerConfig, WorkerPool,
//! };
//! use abide_fetcher::constants::archive;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let subjects = vec![SubjectId::new("Pitt_0050003")];
//! let catalog = FileCatalog::build(&CatalogConfig::default());
//! let task_set = TaskSet::enumerate(&subjects, &catalog, "abide_data".as_ref())?;
//!
//! let client = Arc::new(ArchiveClient::new(archive::BASE_URL, ClientConfig::default())?);
//! let executor = Arc::new(FetchExecutor::new(
//!     client,
//!     FetcherConfig {
//!         local_root: "abide_data".into(),
//!         skip_existing: true,
//!     },
//! ));
//! let store = Arc::new(ResultStore::new());
//!
//! let pool = WorkerPool::new(WorkerConfig::default(), executor, Arc::clone(&store))?;
//! pool.run(task_set.into_tasks(), None).await;
//!
//! let snapshot = store.snapshot().await;
//! println!("{} files downloaded", snapshot.counts().success);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod fetcher;
pub mod metadata;
pub mod models;
pub mod report;
pub mod results;
pub mod tasks;
pub mod worker;

// Re-export main public API
pub use catalog::{CatalogConfig, FileCatalog};
pub use client::{ArchiveClient, ClientConfig};
pub use fetcher::{FetchExecutor, FetcherConfig};
pub use metadata::load_subject_ids;
pub use models::{FetchErrorKind, FetchOutcome, FetchTask, SubjectId};
pub use report::RunReport;
pub use results::{OutcomeCounts, ResultSnapshot, ResultStore};
pub use tasks::TaskSet;
pub use worker::{TaskEvent, WorkerConfig, WorkerPool};
