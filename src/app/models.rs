//! Data models for ABIDE Fetcher
//!
//! This module defines the core data structures used throughout the
//! application: subject identifiers, fetch tasks, and the classified
//! per-task outcome.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::archive;

/// Identifier of one subject directory in the remote archive
///
/// Taken verbatim from the FILE_ID column of the phenotypic metadata.
/// The reserved value [`archive::NO_DATA_SENTINEL`] marks entries without
/// released imaging data; those contribute no fetch tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    /// Create a subject identifier from a raw metadata field
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this entry has released imaging data
    ///
    /// Sentinel and empty entries are excluded from task generation.
    pub fn has_data(&self) -> bool {
        !self.0.is_empty() && self.0 != archive::NO_DATA_SENTINEL
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One unit of work: a single remote file for a single subject
///
/// Immutable for the life of a run. Both the remote URL and the local
/// mirror path are derived deterministically from the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    subject: SubjectId,
    relative_path: String,
}

impl FetchTask {
    /// Create a task for one subject-relative file path
    pub fn new(subject: SubjectId, relative_path: impl Into<String>) -> Self {
        Self {
            subject,
            relative_path: relative_path.into(),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Path relative to the subject directory, forward-slash separated
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Resolve the remote URL: `<base_url>/<subject>/<relative_path>`
    pub fn remote_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.subject,
            self.relative_path
        )
    }

    /// Resolve the local mirror path: `<local_root>/<subject>/<relative_path>`
    ///
    /// Forward-slash segments are mapped to platform path components, so the
    /// local tree mirrors the remote relative structure exactly.
    pub fn local_path(&self, local_root: &Path) -> PathBuf {
        let mut path = local_root.join(self.subject.as_str());
        for segment in self.relative_path.split('/') {
            path.push(segment);
        }
        path
    }
}

/// Classified result of one fetch task
///
/// Exactly one outcome is produced per task; tasks are never retried and
/// outcomes are never re-emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// File downloaded and written to the mirror
    Success,
    /// No network access performed for this task
    Skipped { reason: String },
    /// Fetch failed; a failing task never aborts sibling tasks
    Error { kind: FetchErrorKind, detail: String },
}

/// Failure classification carried by [`FetchOutcome::Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Server answered with a non-2xx status; detail is the numeric code
    HttpStatus,
    /// Connection or transport failure; detail is a reason string
    Transport,
    /// Anything else, e.g. a local filesystem write failure
    Unknown,
}

impl FetchOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn error(kind: FetchErrorKind, detail: impl Into<String>) -> Self {
        Self::Error {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// One-letter status code used in per-task progress lines
    ///
    /// K = download okay, S = skipped, E = download error.
    pub fn status_code(&self) -> char {
        match self {
            Self::Success => 'K',
            Self::Skipped { .. } => 'S',
            Self::Error { .. } => 'E',
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::Skipped { reason } => write!(f, "skipped: {}", reason),
            Self::Error {
                kind: FetchErrorKind::HttpStatus,
                detail,
            } => write!(f, "HTTP {}", detail),
            Self::Error {
                kind: FetchErrorKind::Transport,
                detail,
            } => write!(f, "transport: {}", detail),
            Self::Error {
                kind: FetchErrorKind::Unknown,
                detail,
            } => write!(f, "error: {}", detail),
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HttpStatus => "http-status",
            Self::Transport => "transport",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
