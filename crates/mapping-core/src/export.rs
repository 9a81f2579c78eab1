//! Writing FHIR bundles to disk.
//!
//! Exports are named `fhir-export-<YYYY-MM-DD>.json`, so a second export on the same day
//! replaces the first. The import template is always `fhir-bundle-template.json`.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use fhir::{export_file_name, Bundle, TEMPLATE_FILE_NAME};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes an export bundle produced at `at` into `dir` and returns the file path.
pub fn write_export(dir: &Path, bundle: &Bundle, at: DateTime<Utc>) -> StoreResult<PathBuf> {
    write_bundle(dir, &export_file_name(at.date_naive()), bundle)
}

/// Writes the sample import bundle into `dir` and returns the file path.
pub fn write_template(dir: &Path, at: DateTime<Utc>) -> StoreResult<PathBuf> {
    write_bundle(dir, TEMPLATE_FILE_NAME, &Bundle::template(at))
}

fn write_bundle(dir: &Path, file_name: &str, bundle: &Bundle) -> StoreResult<PathBuf> {
    fs::create_dir_all(dir).map_err(StoreError::StorageDirCreation)?;

    let path = dir.join(file_name);
    let json = bundle.to_pretty_json()?;
    fs::write(&path, json).map_err(StoreError::FileWrite)?;

    tracing::info!(
        "wrote FHIR bundle {} ({} entries) to {}",
        bundle.id,
        bundle.entry.len(),
        path.display()
    );
    Ok(path)
}
