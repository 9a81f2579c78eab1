//! Durable key → blob storage backing the [`MappingStore`](crate::MappingStore).
//!
//! The store keeps two blobs, each a JSON array, and rewrites a blob in full whenever its
//! collection changes. Backends only need to move whole strings in and out.
//!
//! ## File layout
//!
//! [`FileStorage`] keeps one file per key inside its directory:
//!
//! ```text
//! namaste_data/
//!   healthcare_patients.json
//!   healthcare_mapping_records.json
//! ```
//!
//! Writes go to a temporary sibling file that is then renamed over the target, so a
//! crash mid-write leaves the previous contents intact.

use crate::constants::STORAGE_FILE_EXTENSION;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A place the store can persist named JSON blobs.
pub trait DurableStorage {
    /// Returns the blob stored under `key`, or `None` if nothing has been written yet.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()>;
}

/// Directory-backed storage, one `<key>.json` file per blob.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{STORAGE_FILE_EXTENSION}"))
    }
}

impl DurableStorage for FileStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::FileRead(e)),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(StoreError::StorageDirCreation)?;

        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.{STORAGE_FILE_EXTENSION}.tmp"));

        fs::write(&staging, contents).map_err(StoreError::FileWrite)?;
        fs::rename(&staging, &target).map_err(StoreError::FileWrite)?;

        tracing::debug!("wrote {} ({} bytes)", target.display(), contents.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_key_is_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.read("healthcare_patients").expect("read").is_none());
    }

    #[test]
    fn write_creates_directory_and_json_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        storage.write("healthcare_patients", "[]").expect("write");

        assert_eq!(
            fs::read_to_string(dir.join("healthcare_patients.json")).expect("read file"),
            "[]"
        );
        assert_eq!(
            storage.read("healthcare_patients").expect("read"),
            Some("[]".to_string())
        );
    }

    #[test]
    fn write_replaces_previous_contents_and_leaves_no_staging_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(temp_dir.path());

        storage.write("k", "[1]").expect("first write");
        storage.write("k", "[1,2]").expect("second write");

        assert_eq!(storage.read("k").expect("read"), Some("[1,2]".to_string()));
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .expect("list dir")
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[test]
    fn write_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write blocker");

        let mut storage = FileStorage::new(blocker.join("data"));
        let err = storage.write("k", "[]").expect_err("parent is a file");
        assert!(matches!(err, StoreError::StorageDirCreation(_)));
    }
}
