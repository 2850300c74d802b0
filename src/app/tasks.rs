//! Task enumeration
//!
//! Builds the full download plan as the cross-product of valid subjects and
//! catalog entries: subjects in metadata order, catalog entries in catalog
//! order within each subject. Sentinel subjects contribute zero tasks and
//! are counted separately for reporting.
//!
//! The local mirror root is validated here, once, before any task exists —
//! a missing root is a fatal configuration error surfaced before any
//! network access.

use std::path::Path;

use tracing::debug;

use crate::app::catalog::FileCatalog;
use crate::app::models::{FetchTask, SubjectId};
use crate::errors::{ConfigError, ConfigResult};

/// Fully materialized download plan for one run
#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: Vec<FetchTask>,
    excluded_subjects: usize,
}

impl TaskSet {
    /// Enumerate fetch tasks for every valid subject
    ///
    /// Task count is `|valid subjects| * |catalog|`, where valid subjects
    /// excludes sentinel entries.
    pub fn enumerate(
        subjects: &[SubjectId],
        catalog: &FileCatalog,
        local_root: &Path,
    ) -> ConfigResult<Self> {
        if !local_root.is_dir() {
            return Err(ConfigError::LocalRootMissing {
                path: local_root.to_path_buf(),
            });
        }

        let mut tasks = Vec::new();
        let mut excluded_subjects = 0;
        for subject in subjects {
            if !subject.has_data() {
                excluded_subjects += 1;
                continue;
            }
            for entry in catalog.entries() {
                tasks.push(FetchTask::new(subject.clone(), entry.clone()));
            }
        }

        debug!(
            "Enumerated {} tasks ({} subject entries excluded)",
            tasks.len(),
            excluded_subjects
        );
        Ok(Self {
            tasks,
            excluded_subjects,
        })
    }

    pub fn tasks(&self) -> &[FetchTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Subject entries that matched the sentinel and contributed no tasks
    pub fn excluded_subjects(&self) -> usize {
        self.excluded_subjects
    }

    /// Cap the task list, keeping enumeration order
    pub fn truncate(&mut self, limit: usize) {
        self.tasks.truncate(limit);
    }

    pub fn into_tasks(self) -> Vec<FetchTask> {
        self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn subjects(ids: &[&str]) -> Vec<SubjectId> {
        ids.iter().map(|id| SubjectId::new(*id)).collect()
    }

    fn small_catalog() -> FileCatalog {
        FileCatalog::from_entries(vec!["x.txt".to_string(), "y/z.txt".to_string()])
    }

    #[test]
    fn test_task_count_is_valid_subjects_times_catalog() {
        let root = TempDir::new().unwrap();
        let subjects = subjects(&["A", "no_filename", "B", "C"]);

        let set = TaskSet::enumerate(&subjects, &small_catalog(), root.path()).unwrap();
        assert_eq!(set.len(), 3 * 2);
        assert_eq!(set.excluded_subjects(), 1);
    }

    #[test]
    fn test_tasks_follow_subject_then_catalog_order() {
        let root = TempDir::new().unwrap();
        let set =
            TaskSet::enumerate(&subjects(&["A", "B"]), &small_catalog(), root.path()).unwrap();

        let pairs: Vec<(&str, &str)> = set
            .tasks()
            .iter()
            .map(|task| (task.subject().as_str(), task.relative_path()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A", "x.txt"),
                ("A", "y/z.txt"),
                ("B", "x.txt"),
                ("B", "y/z.txt"),
            ]
        );
    }

    #[test]
    fn test_missing_local_root_is_fatal() {
        let result = TaskSet::enumerate(
            &subjects(&["A"]),
            &small_catalog(),
            Path::new("/nonexistent/mirror/root"),
        );
        assert!(matches!(result, Err(ConfigError::LocalRootMissing { .. })));
    }

    #[test]
    fn test_sentinel_only_input_yields_empty_plan() {
        let root = TempDir::new().unwrap();
        let set = TaskSet::enumerate(
            &subjects(&["no_filename", "no_filename"]),
            &small_catalog(),
            root.path(),
        )
        .unwrap();

        assert!(set.is_empty());
        assert_eq!(set.excluded_subjects(), 2);
    }

    #[test]
    fn test_truncate_caps_plan_in_order() {
        let root = TempDir::new().unwrap();
        let mut set =
            TaskSet::enumerate(&subjects(&["A", "B"]), &small_catalog(), root.path()).unwrap();

        set.truncate(3);
        assert_eq!(set.len(), 3);
        assert_eq!(set.tasks()[2].subject().as_str(), "B");
    }
}
