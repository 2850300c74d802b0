//! Concurrent outcome aggregation
//!
//! The result store maps each task's remote URL to its classified outcome.
//! Workers record outcomes concurrently while the pool runs; the store
//! grows monotonically and is read through a frozen snapshot once the pool
//! has drained.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::warn;

use crate::app::models::FetchOutcome;

/// Thread-safe store of per-task outcomes, keyed by remote URL
#[derive(Debug, Default)]
pub struct ResultStore {
    outcomes: RwLock<HashMap<String, FetchOutcome>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one task outcome
    ///
    /// Safe to call from any number of concurrent workers. Task URLs are
    /// unique by construction; a second record for the same URL indicates a
    /// bug upstream and is logged.
    pub async fn record(&self, url: impl Into<String>, outcome: FetchOutcome) {
        let url = url.into();
        let mut outcomes = self.outcomes.write().await;
        if outcomes.insert(url.clone(), outcome).is_some() {
            warn!("Duplicate outcome recorded for {}", url);
        }
    }

    pub async fn len(&self) -> usize {
        self.outcomes.read().await.len()
    }

    /// Consistent, fully-populated view for reporting
    ///
    /// Intended to be called after the worker pool has drained; entries
    /// recorded later are not reflected in the returned snapshot.
    pub async fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot {
            outcomes: self.outcomes.read().await.clone(),
        }
    }
}

/// Frozen view of all recorded outcomes
#[derive(Debug, Clone)]
pub struct ResultSnapshot {
    outcomes: HashMap<String, FetchOutcome>,
}

impl ResultSnapshot {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&FetchOutcome> {
        self.outcomes.get(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FetchOutcome)> {
        self.outcomes.iter()
    }

    /// Aggregate counts by outcome kind
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for outcome in self.outcomes.values() {
            match outcome {
                FetchOutcome::Success => counts.success += 1,
                FetchOutcome::Skipped { .. } => counts.skipped += 1,
                FetchOutcome::Error { .. } => counts.errors += 1,
            }
        }
        counts
    }

    /// Non-success outcomes, sorted by URL for stable reporting
    pub fn non_success(&self) -> Vec<(&str, &FetchOutcome)> {
        let mut rows: Vec<_> = self
            .outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .map(|(url, outcome)| (url.as_str(), outcome))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

/// Outcome counts for one completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub success: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.errors
    }
}
