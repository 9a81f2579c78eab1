//! Constants used throughout the mapping core crate.
//!
//! Storage keys match the blob names used by earlier browser-hosted versions of the tool so
//! that exported storage can be dropped into a data directory unchanged.

/// Storage key holding the JSON array of registered patients.
pub const PATIENTS_STORAGE_KEY: &str = "healthcare_patients";

/// Storage key holding the JSON array of mapping records.
pub const MAPPING_RECORDS_STORAGE_KEY: &str = "healthcare_mapping_records";

/// File extension appended to storage keys by [`FileStorage`](crate::FileStorage).
pub const STORAGE_FILE_EXTENSION: &str = "json";

/// Default directory for local storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "namaste_data";

/// Display name used for mapping records whose patient is not registered.
pub const UNKNOWN_PATIENT_NAME: &str = "Unknown Patient";

/// Number of conditions reported by [`MappingAnalytics`](crate::MappingAnalytics).
pub const TOP_CONDITIONS_LIMIT: usize = 5;
