//! Phenotypic metadata loading
//!
//! Reads the ordered subject identifier column from the ABIDE phenotypic
//! CSV. Sentinel entries ("no_filename") are preserved in the returned
//! sequence; the task enumerator excludes them and counts them separately.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::app::models::SubjectId;
use crate::constants::archive;
use crate::errors::{MetadataError, MetadataResult};

/// Load the ordered FILE_ID column from the phenotypic metadata CSV
pub fn load_subject_ids(path: &Path) -> MetadataResult<Vec<SubjectId>> {
    if !path.is_file() {
        return Err(MetadataError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|header| header == archive::FILE_ID_COLUMN)
        .ok_or_else(|| MetadataError::MissingColumn {
            column: archive::FILE_ID_COLUMN.to_string(),
        })?;

    let mut subjects = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(field) = record.get(column) {
            subjects.push(SubjectId::new(field.trim()));
        }
    }

    info!(
        "Loaded {} subject entries from {}",
        subjects.len(),
        path.display()
    );
    Ok(subjects)
}
