//! Per-subject file catalog
//!
//! This module builds the deterministic, ordered list of file paths fetched
//! for every subject, relative to the subject's directory in the archive.
//! The catalog is expanded from static stem groups: paired-hemisphere
//! surfaces and morphometry data, standard-space (fsaverage) maps with a
//! smoothing-width expansion, atlas statistics, labels, volumes, and
//! transforms.
//!
//! The builder is pure: identical configuration yields identical output in
//! identical order. Total task counts and progress reporting depend on a
//! stable catalog size.

use std::collections::HashSet;

use crate::constants::catalog::{
    HEMISPHERES, LABEL_DIR, MRI_DIR, SMOOTHING_WIDTHS, STATS_DIR, SURF_DIR, TRANSFORMS_DIR,
};

/// Static stem groups from which the catalog is expanded
///
/// The defaults cover the FreeSurfer files needed for surface-based
/// morphometry analysis. Note that `aparc.DKTatlas.stats` is not available
/// for ABIDE and is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Paired-hemisphere surface meshes under `surf/`
    pub surface_stems: Vec<String>,
    /// Paired-hemisphere native-space morphometry data under `surf/`
    pub morphometry_stems: Vec<String>,
    /// Morphometry stems mapped to fsaverage standard space
    pub standard_space_stems: Vec<String>,
    /// Smoothing kernel widths (mm FWHM) for standard-space maps
    pub smoothing_widths: Vec<u8>,
    /// Paired-hemisphere atlas statistics under `stats/`
    pub stats_stems: Vec<String>,
    /// Hemisphere-independent statistics under `stats/`
    pub global_stats_files: Vec<String>,
    /// Paired-hemisphere parcellations and labels under `label/`
    pub label_stems: Vec<String>,
    /// Volume files under `mri/`
    pub volume_files: Vec<String>,
    /// Transformation matrices under `mri/transforms/`
    pub transform_files: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            surface_stems: to_strings(&[
                "white",
                "pial",
                "inflated",
                "orig",
                "smoothwm",
                "sphere",
                "sphere.reg",
            ]),
            morphometry_stems: to_strings(&[
                "jacobian_white",
                "thickness",
                "area",
                "area.pial",
                "curv",
                "curv.pial",
                "volume",
                "sulc",
            ]),
            standard_space_stems: to_strings(&[
                "area",
                "area.pial",
                "sulc",
                "thickness",
                "curv",
                "volume",
            ]),
            smoothing_widths: SMOOTHING_WIDTHS.to_vec(),
            stats_stems: to_strings(&["aparc.stats", "aparc.a2009s.stats"]),
            global_stats_files: to_strings(&["aseg.stats"]),
            label_stems: to_strings(&["aparc.annot", "aparc.a2009s.annot", "cortex.label"]),
            volume_files: to_strings(&[
                "brain.mgz",
                "brainmask.mgz",
                "orig.mgz",
                "T1.mgz",
                "aseg.mgz",
                "wm.mgz",
            ]),
            transform_files: to_strings(&["talairach.m3z", "talairach.xfm"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ordered, deduplicated list of relative paths fetched per subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCatalog {
    entries: Vec<String>,
}

impl FileCatalog {
    /// Expand the configured stem groups into the full catalog
    pub fn build(config: &CatalogConfig) -> Self {
        let mut entries = Vec::new();
        entries.extend(both_hemi_files(SURF_DIR, &config.surface_stems));
        entries.extend(both_hemi_files(SURF_DIR, &config.morphometry_stems));
        entries.extend(standard_space_files(
            SURF_DIR,
            &config.standard_space_stems,
            &config.smoothing_widths,
        ));
        entries.extend(both_hemi_files(STATS_DIR, &config.stats_stems));
        entries.extend(files_in_subdir(STATS_DIR, &config.global_stats_files));
        entries.extend(both_hemi_files(LABEL_DIR, &config.label_stems));
        entries.extend(files_in_subdir(MRI_DIR, &config.volume_files));
        entries.extend(files_in_subdir(TRANSFORMS_DIR, &config.transform_files));
        Self::from_entries(entries)
    }

    /// Build a catalog from explicit entries
    ///
    /// Preserves first-seen order and drops duplicates.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
        Self { entries }
    }

    /// All relative paths, in catalog order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Emit both hemisphere variants of each stem: all left, then all right
fn both_hemi_files(subdir: &str, stems: &[String]) -> Vec<String> {
    let mut files = Vec::with_capacity(stems.len() * 2);
    for hemi in HEMISPHERES {
        for stem in stems {
            files.push(format!("{}/{}.{}", subdir, hemi, stem));
        }
    }
    files
}

/// Emit fsaverage mappings: one entry per (smoothing width, hemisphere, stem)
///
/// Width-major order, left hemisphere before right within each width.
fn standard_space_files(subdir: &str, stems: &[String], widths: &[u8]) -> Vec<String> {
    let mut files = Vec::with_capacity(stems.len() * widths.len() * 2);
    for width in widths {
        for hemi in HEMISPHERES {
            for stem in stems {
                files.push(format!(
                    "{}/{}.{}.fwhm{}.fsaverage.mgh",
                    subdir, hemi, stem, width
                ));
            }
        }
    }
    files
}

fn files_in_subdir(subdir: &str, files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|file| format!("{}/{}", subdir, file))
        .collect()
}
