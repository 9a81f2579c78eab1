//! Import of user-supplied FHIR bundles.
//!
//! The text is parsed as JSON and checked with [`fhir::validate_bundle`]. Any violation
//! rejects the whole document and nothing is forwarded. A document that cannot be parsed
//! is reported with the same single generic message whatever the cause, so callers see
//! one list of human-readable reasons in every failure case.
//!
//! Accepted bundles go to the upload stub, which only issues a receipt. Imported
//! conditions are not added to the store.

use chrono::{DateTime, Utc};
use namaste_ids::timestamp_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Reason reported for text that is not a JSON document with a body to check.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse JSON file or upload bundle";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("bundle rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
}

impl ImportError {
    /// The individual reasons, in check order.
    pub fn violations(&self) -> &[String] {
        match self {
            ImportError::Rejected(reasons) => reasons,
        }
    }

    fn parse_failure() -> Self {
        ImportError::Rejected(vec![PARSE_FAILURE_MESSAGE.to_string()])
    }
}

/// Acknowledgement returned by the upload stub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    pub id: String,
}

/// Validate `text` as a FHIR bundle and forward it to the upload stub.
///
/// # Errors
///
/// Returns [`ImportError::Rejected`] carrying either every validation violation or the
/// single parse failure message.
pub fn import_bundle(text: &str) -> Result<UploadReceipt, ImportError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!("bundle is not valid JSON: {}", e);
        ImportError::parse_failure()
    })?;

    if doc.is_null() {
        return Err(ImportError::parse_failure());
    }

    let violations = fhir::validate_bundle(&doc);
    if !violations.is_empty() {
        return Err(ImportError::Rejected(
            violations.iter().map(ToString::to_string).collect(),
        ));
    }

    Ok(upload_bundle(&doc, Utc::now()))
}

/// Read `path` and import its contents.
///
/// An unreadable file is reported like unparseable text.
///
/// # Errors
///
/// See [`import_bundle`].
pub fn import_bundle_file(path: &Path) -> Result<UploadReceipt, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!("failed to read bundle file {}: {}", path.display(), e);
        ImportError::parse_failure()
    })?;
    import_bundle(&text)
}

fn upload_bundle(doc: &Value, at: DateTime<Utc>) -> UploadReceipt {
    let entries = doc
        .get("entry")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    let receipt = UploadReceipt {
        success: true,
        id: timestamp_id("bundle_", at),
    };
    tracing::info!("accepted bundle upload {} ({} entries)", receipt.id, entries);
    receipt
}
