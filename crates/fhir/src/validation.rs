//! Field-presence checks for externally supplied FHIR bundles.
//!
//! Uploaded documents are inspected as untyped JSON so that every problem can be reported
//! at once. All checks run; none short-circuits.
//!
//! The ICD-11 check is a literal substring test on the coding system. WHO linearization
//! URIs (`http://id.who.int/icd/...`) do not contain `ICD-11` and so do not satisfy it.

use crate::condition::{ICD11_SYSTEM, NAMASTE_SYSTEM};
use serde_json::Value;
use std::fmt;

/// A single reason an uploaded bundle was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleViolation {
    /// `resourceType` is missing or not `"Bundle"`.
    ResourceType,
    /// `type` is missing or falsy.
    MissingType,
    /// `entry` is missing or not an array.
    EntryArray,
    /// No entry carries a coding with system `"NAMASTE"`.
    MissingNamasteCoding,
    /// No entry carries a coding whose system contains `"ICD-11"`.
    MissingIcd11Coding,
}

impl fmt::Display for BundleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BundleViolation::ResourceType => {
                "Invalid FHIR Bundle: Missing or incorrect resourceType"
            }
            BundleViolation::MissingType => "Invalid FHIR Bundle: Missing type",
            BundleViolation::EntryArray => "Invalid FHIR Bundle: Missing or invalid entry array",
            BundleViolation::MissingNamasteCoding => "Bundle should contain NAMASTE coding system",
            BundleViolation::MissingIcd11Coding => "Bundle should contain ICD-11 coding system",
        };
        f.write_str(msg)
    }
}

/// Checks `doc` against the bundle shape the import path expects.
///
/// Returns every violation found, in check order. An empty vector means the bundle is
/// acceptable.
pub fn validate_bundle(doc: &Value) -> Vec<BundleViolation> {
    let mut violations = Vec::new();

    if doc.get("resourceType").and_then(Value::as_str) != Some("Bundle") {
        violations.push(BundleViolation::ResourceType);
    }

    if !doc.get("type").is_some_and(is_truthy) {
        violations.push(BundleViolation::MissingType);
    }

    let entries = doc.get("entry").and_then(Value::as_array);
    if entries.is_none() {
        violations.push(BundleViolation::EntryArray);
    }

    let systems: Vec<&str> = entries
        .into_iter()
        .flatten()
        .flat_map(coding_systems)
        .collect();

    if !systems.iter().any(|s| *s == NAMASTE_SYSTEM) {
        violations.push(BundleViolation::MissingNamasteCoding);
    }

    if !systems.iter().any(|s| s.contains(ICD11_SYSTEM)) {
        violations.push(BundleViolation::MissingIcd11Coding);
    }

    violations
}

/// String `system` values of `entry.resource.code.coding[]`.
fn coding_systems(entry: &Value) -> impl Iterator<Item = &str> {
    entry
        .get("resource")
        .and_then(|r| r.get("code"))
        .and_then(|c| c.get("coding"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|coding| coding.get("system").and_then(Value::as_str))
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
