//! FHIR wire/boundary support for NAMASTE ↔ ICD-11 mappings.
//!
//! This crate provides **wire models** and **shape checks** for the two FHIR documents the
//! mapping workspace produces or accepts:
//! - `Condition` resources derived from a single mapping record
//! - `Bundle` documents of type `collection` used for export, templates and import
//!
//! This crate focuses on:
//! - serialisation/deserialisation of the JSON wire format
//! - field-presence validation of externally supplied bundles
//!
//! It does NOT attempt FHIR conformance validation; checks are limited to what the mapping
//! workflow needs (resource type, bundle type, entry array, coding systems).

pub mod bundle;
pub mod condition;
pub mod validation;

pub use bundle::{export_file_name, Bundle, BundleEntry, BUNDLE_TYPE_COLLECTION, TEMPLATE_FILE_NAME};
pub use condition::{
    CodeableConcept, CodePair, Coding, Condition, Meta, Reference, CONDITION_PROFILE,
    ICD11_SYSTEM, NAMASTE_SYSTEM, WHO_ICD11_MMS_SYSTEM,
};
pub use validation::{validate_bundle, BundleViolation};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
