//! Single-task fetch execution
//!
//! The executor runs one fetch task to completion: it resolves the remote
//! URL and local mirror path, materializes ancestor directories, applies the
//! skip-existing check, performs the streaming download, and classifies the
//! result. Every failure is folded into a [`FetchOutcome`] value — nothing
//! escapes as an error that could abort sibling tasks or the pool.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::app::client::ArchiveClient;
use crate::app::models::{FetchErrorKind, FetchOutcome, FetchTask};
use crate::errors::DownloadError;

/// Skip reason recorded when a local file already exists
const SKIP_EXISTS_REASON: &str = "skipped on user request: local file exists";

/// Fetch executor configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Root of the local mirror tree; validated to exist before the run
    pub local_root: PathBuf,
    /// Keep existing local files instead of re-fetching them
    pub skip_existing: bool,
}

/// Executes individual fetch tasks against the archive
#[derive(Debug)]
pub struct FetchExecutor {
    client: Arc<ArchiveClient>,
    config: FetcherConfig,
}

impl FetchExecutor {
    pub fn new(client: Arc<ArchiveClient>, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Run one task to completion
    ///
    /// Returns the task's remote URL and its classified outcome. Exactly one
    /// outcome is produced per call; the task is never retried here.
    pub async fn execute(&self, task: &FetchTask) -> (String, FetchOutcome) {
        let url = task.remote_url(self.client.base_url());
        let outcome = self.execute_inner(task, &url).await;

        match &outcome {
            FetchOutcome::Error { detail, .. } => warn!("E: {} ({})", url, detail),
            other => debug!("{}: {}", other.status_code(), url),
        }
        (url, outcome)
    }

    async fn execute_inner(&self, task: &FetchTask, url: &str) -> FetchOutcome {
        let local_path = task.local_path(&self.config.local_root);

        // Create-if-missing is idempotent, so concurrent tasks materializing
        // a shared subject directory never conflict.
        if let Some(parent) = local_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return FetchOutcome::error(
                    FetchErrorKind::Unknown,
                    format!("failed to create {}: {}", parent.display(), e),
                );
            }
        }

        if self.config.skip_existing {
            if let Ok(metadata) = tokio::fs::metadata(&local_path).await {
                if metadata.is_file() {
                    return FetchOutcome::skipped(SKIP_EXISTS_REASON);
                }
            }
        }

        match self.client.fetch_to_file(url, &local_path).await {
            Ok(()) => FetchOutcome::Success,
            Err(e) => classify(e),
        }
    }
}

/// Map a download failure onto the outcome taxonomy
fn classify(error: DownloadError) -> FetchOutcome {
    match error {
        DownloadError::ServerError { status } => {
            FetchOutcome::error(FetchErrorKind::HttpStatus, status.to_string())
        }
        DownloadError::Http(e) => FetchOutcome::error(FetchErrorKind::Transport, transport_reason(&e)),
        DownloadError::Io(e) => FetchOutcome::error(FetchErrorKind::Unknown, e.to_string()),
    }
}

fn transport_reason(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
