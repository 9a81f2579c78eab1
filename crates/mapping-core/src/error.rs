#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write storage file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read storage file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored {key} is unreadable at {path}: {source}")]
    CorruptStorage {
        key: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Returned when a string does not name a variant of one of the core enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
