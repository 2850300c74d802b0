//! Final run reporting
//!
//! Renders the aggregate result of a completed run: total tasks handled,
//! counts by outcome kind, excluded subject entries, and the URL plus
//! detail of every non-success outcome. Purely observational — the report
//! consumes a frozen snapshot and has no effect on run correctness.

use std::fmt::Write;
use std::time::Duration;

use crate::app::results::{OutcomeCounts, ResultSnapshot};

/// Summary of one completed fetch run
#[derive(Debug, Clone)]
pub struct RunReport {
    counts: OutcomeCounts,
    total_tasks: usize,
    excluded_subjects: usize,
    worker_count: usize,
    elapsed: Duration,
    non_success: Vec<String>,
}

impl RunReport {
    pub fn new(
        snapshot: &ResultSnapshot,
        total_tasks: usize,
        excluded_subjects: usize,
        worker_count: usize,
        elapsed: Duration,
    ) -> Self {
        let non_success = snapshot
            .non_success()
            .into_iter()
            .map(|(url, outcome)| format!("{}: {} ({})", outcome.status_code(), url, outcome))
            .collect();

        Self {
            counts: snapshot.counts(),
            total_tasks,
            excluded_subjects,
            worker_count,
            elapsed,
            non_success,
        }
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    /// Whether every handled task ended in success or skip
    pub fn is_clean(&self) -> bool {
        self.counts.errors == 0
    }

    /// Render the human-readable summary
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(
            out,
            "Download finished: handled {} URLs in total ({} in parallel) in {:.1?}.",
            self.total_tasks, self.worker_count, self.elapsed
        )
        .ok();
        writeln!(
            out,
            "Result: {} downloaded, {} existed, {} failed, {} subject entries without data.",
            self.counts.success, self.counts.skipped, self.counts.errors, self.excluded_subjects
        )
        .ok();

        if !self.non_success.is_empty() {
            writeln!(
                out,
                "Non-success outcomes (S=skipped, E=download error):"
            )
            .ok();
            for line in &self.non_success {
                writeln!(out, "  {}", line).ok();
            }
        }

        out
    }
}
