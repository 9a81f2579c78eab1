//! FHIR `Bundle` (type `collection`) wire model.
//!
//! Bundles are used in three places:
//! - the export of every mapping record's condition, in store order
//! - the downloadable template showing the expected import shape
//! - the import path, where an uploaded document is checked with
//!   [`validate_bundle`](crate::validate_bundle) before it is accepted

use crate::condition::{
    CodeableConcept, Coding, Condition, Meta, Reference, CONDITION_PROFILE, NAMASTE_SYSTEM,
    WHO_ICD11_MMS_SYSTEM,
};
use crate::FhirResult;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use namaste_ids::timestamp_id;
use serde::{Deserialize, Serialize};

/// Bundle type used for every bundle this crate produces.
pub const BUNDLE_TYPE_COLLECTION: &str = "collection";

/// File name offered for the bundle template download.
pub const TEMPLATE_FILE_NAME: &str = "fhir-bundle-template.json";

const BUNDLE_RESOURCE_TYPE: &str = "Bundle";
const TEMPLATE_BUNDLE_ID: &str = "namaste-icd11-template";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleEntry {
    pub resource: Condition,
}

/// Wire representation of a FHIR `Bundle` carrying `Condition` entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Bundle {
    pub resource_type: String,
    pub id: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Builds a `collection` bundle wrapping `conditions` in iteration order.
    pub fn collection(id: impl Into<String>, conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            resource_type: BUNDLE_RESOURCE_TYPE.to_string(),
            id: id.into(),
            bundle_type: BUNDLE_TYPE_COLLECTION.to_string(),
            timestamp: None,
            entry: conditions
                .into_iter()
                .map(|resource| BundleEntry { resource })
                .collect(),
        }
    }

    /// Builds an export bundle with id `export-<epoch-millis>`.
    ///
    /// An empty iterator produces a bundle with an empty `entry` array.
    pub fn export(conditions: impl IntoIterator<Item = Condition>, at: DateTime<Utc>) -> Self {
        Self::collection(timestamp_id("export-", at), conditions)
    }

    /// Builds the sample bundle offered to users as an import template.
    ///
    /// The ICD-11 coding uses the WHO MMS URI as its system, which does not contain the
    /// literal `ICD-11`; the template therefore fails the ICD-11 coding check on import.
    pub fn template(at: DateTime<Utc>) -> Self {
        let condition = Condition {
            resource_type: "Condition".to_string(),
            id: "condition-example".to_string(),
            subject: Reference {
                reference: "Patient/example-patient".to_string(),
            },
            code: CodeableConcept {
                coding: vec![
                    Coding {
                        system: NAMASTE_SYSTEM.to_string(),
                        code: "NAM-AYU-103".to_string(),
                        display: "Jvara".to_string(),
                    },
                    Coding {
                        system: WHO_ICD11_MMS_SYSTEM.to_string(),
                        code: "1D44".to_string(),
                        display: "Fever of unknown origin".to_string(),
                    },
                ],
            },
            meta: Meta {
                profile: vec![CONDITION_PROFILE.to_string()],
            },
        };

        let mut bundle = Self::collection(TEMPLATE_BUNDLE_ID, [condition]);
        bundle.timestamp = Some(at.to_rfc3339_opts(SecondsFormat::Millis, true));
        bundle
    }

    /// Render the bundle as pretty-printed JSON (two-space indent).
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidJson`](crate::FhirError::InvalidJson) if serialisation fails.
    pub fn to_pretty_json(&self) -> FhirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Conditions carried by this bundle, in entry order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.entry.iter().map(|e| &e.resource)
    }
}

/// File name for an export produced on `date`: `fhir-export-<YYYY-MM-DD>.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("fhir-export-{}.json", date.format("%Y-%m-%d"))
}
