//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into the store and export paths, so that
//! nothing reads environment variables while handling a command.

use crate::constants::DEFAULT_DATA_DIR;
use crate::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    export_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] if either path is empty, or if `data_dir` exists
    /// but is not a directory.
    pub fn new(data_dir: PathBuf, export_dir: PathBuf) -> StoreResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput("data_dir cannot be empty".into()));
        }
        if export_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput(
                "export_dir cannot be empty".into(),
            ));
        }
        if data_dir.exists() && !data_dir.is_dir() {
            return Err(StoreError::InvalidInput(format!(
                "data_dir {} is not a directory",
                data_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            export_dir,
        })
    }

    /// Directory holding the persisted patient and mapping record blobs.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory that exported bundles and the import template are written to.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

/// Resolve the data directory from an optional environment value.
///
/// Blank values fall back to [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn blank_env_value_uses_default() {
        assert_eq!(data_dir_from_env_value(None), PathBuf::from("namaste_data"));
        assert_eq!(
            data_dir_from_env_value(Some("   ".into())),
            PathBuf::from("namaste_data")
        );
        assert_eq!(
            data_dir_from_env_value(Some(" /var/lib/namaste ".into())),
            PathBuf::from("/var/lib/namaste")
        );
    }

    #[test]
    fn rejects_empty_paths() {
        let err = CoreConfig::new(PathBuf::new(), PathBuf::from(".")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        let err = CoreConfig::new(PathBuf::from("data"), PathBuf::new()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn rejects_data_dir_that_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, "x").expect("write");

        let err = CoreConfig::new(file, temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn accepts_missing_data_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("later");

        let cfg = CoreConfig::new(data_dir.clone(), temp_dir.path().to_path_buf())
            .expect("missing dir is created on first write");
        assert_eq!(cfg.data_dir(), data_dir.as_path());
        assert_eq!(cfg.export_dir(), temp_dir.path());
    }
}
