//! Bounded worker pool
//!
//! This module drains a pre-materialized task list with a fixed number of
//! concurrent workers. Workers claim tasks through a shared atomic cursor,
//! so every task is attempted exactly once; completion order is unspecified
//! and results are commutative. The pool owns its workers for the life of
//! one run and always drains fully before returning control to the caller.
//!
//! The pool is constructed with its executor and result store injected —
//! there is no ambient shared state and no process-wide singleton.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::fetcher::FetchExecutor;
use crate::app::models::{FetchOutcome, FetchTask};
use crate::app::results::ResultStore;
use crate::constants::workers;
use crate::errors::{ConfigError, ConfigResult};

/// Worker pool configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Number of concurrently in-flight fetches
    pub worker_count: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

impl WorkerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workers".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.worker_count > workers::MAX_WORKER_COUNT {
            warn!(
                "{} workers exceeds the recommended maximum of {}",
                self.worker_count,
                workers::MAX_WORKER_COUNT
            );
        }
        Ok(())
    }
}

/// Per-task completion event emitted while the pool runs
#[derive(Debug, Clone)]
pub struct TaskEvent {
    pub url: String,
    pub outcome: FetchOutcome,
}

/// Fixed-size pool of download workers
#[derive(Debug)]
pub struct WorkerPool {
    config: WorkerConfig,
    executor: Arc<FetchExecutor>,
    store: Arc<ResultStore>,
}

impl WorkerPool {
    /// Create a pool with a validated configuration
    pub fn new(
        config: WorkerConfig,
        executor: Arc<FetchExecutor>,
        store: Arc<ResultStore>,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            executor,
            store,
        })
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Execute every task exactly once, returning after all workers drained
    ///
    /// A completion event is emitted per task when an event channel is
    /// given; a dropped receiver never stalls the pool.
    pub async fn run(&self, tasks: Vec<FetchTask>, events: Option<mpsc::UnboundedSender<TaskEvent>>) {
        if tasks.is_empty() {
            info!("No tasks to execute");
            return;
        }

        let task_count = tasks.len();
        let worker_count = self.config.worker_count.min(task_count);
        info!("Starting {} workers for {} tasks", worker_count, task_count);

        let tasks: Arc<[FetchTask]> = tasks.into();
        let cursor = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let tasks = Arc::clone(&tasks);
            let cursor = Arc::clone(&cursor);
            let executor = Arc::clone(&self.executor);
            let store = Arc::clone(&self.store);
            let events = events.clone();

            handles.push(tokio::spawn(async move {
                let mut completed = 0usize;
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(task) = tasks.get(index) else {
                        break;
                    };

                    let (url, outcome) = executor.execute(task).await;
                    store.record(url.clone(), outcome.clone()).await;
                    completed += 1;

                    if let Some(tx) = &events {
                        let _ = tx.send(TaskEvent { url, outcome });
                    }
                }
                debug!("Worker {} drained after {} tasks", worker_id, completed);
            }));
        }

        for (worker_id, result) in join_all(handles).await.into_iter().enumerate() {
            if let Err(e) = result {
                warn!("Worker {} terminated abnormally: {}", worker_id, e);
            }
        }
        info!("All workers drained");
    }
}
