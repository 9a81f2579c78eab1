//! FHIR `Condition` wire model derived from a mapping record.
//!
//! A mapping record pairs one NAMASTE code with one ICD-11 code for a patient. Its FHIR
//! rendering is a `Condition` whose `code.coding` carries exactly two entries, NAMASTE first
//! and ICD-11 second:
//!
//! ```json
//! {
//!   "resourceType": "Condition",
//!   "id": "cond-1792411200123",
//!   "subject": { "reference": "Patient/PAT-1792411200000-k3j9x0q2a" },
//!   "code": {
//!     "coding": [
//!       { "system": "NAMASTE", "code": "NAM-AYU-103", "display": "Jvara" },
//!       { "system": "ICD-11", "code": "1D44", "display": "Fever of unknown origin" }
//!     ]
//!   },
//!   "meta": { "profile": ["http://hl7.org/fhir/StructureDefinition/Condition"] }
//! }
//! ```
//!
//! The resource is a snapshot: it is built once when the mapping is created and never
//! recomputed.

use serde::{Deserialize, Serialize};

/// Coding system label for NAMASTE codings.
pub const NAMASTE_SYSTEM: &str = "NAMASTE";

/// Coding system label for ICD-11 codings produced by this workspace.
pub const ICD11_SYSTEM: &str = "ICD-11";

/// WHO ICD-11 MMS linearization URI, used by the downloadable bundle template.
pub const WHO_ICD11_MMS_SYSTEM: &str = "http://id.who.int/icd/release/11/2023-01/mms";

/// Base profile declared in `meta.profile` of every derived condition.
pub const CONDITION_PROFILE: &str = "http://hl7.org/fhir/StructureDefinition/Condition";

const CONDITION_RESOURCE_TYPE: &str = "Condition";

/// A code and its human-readable display text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePair {
    pub code: String,
    pub display: String,
}

impl CodePair {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    pub reference: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Meta {
    pub profile: Vec<String>,
}

/// Wire representation of a FHIR `Condition` resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Condition {
    pub resource_type: String,
    pub id: String,
    pub subject: Reference,
    pub code: CodeableConcept,
    pub meta: Meta,
}

impl Condition {
    /// Builds the condition for a NAMASTE → ICD-11 pairing recorded against `patient_id`.
    ///
    /// Inputs are copied verbatim; neither the patient reference nor the codes are checked.
    pub fn for_mapping(
        id: impl Into<String>,
        patient_id: &str,
        namaste: &CodePair,
        icd: &CodePair,
    ) -> Self {
        Self {
            resource_type: CONDITION_RESOURCE_TYPE.to_string(),
            id: id.into(),
            subject: Reference {
                reference: format!("Patient/{patient_id}"),
            },
            code: CodeableConcept {
                coding: vec![
                    Coding {
                        system: NAMASTE_SYSTEM.to_string(),
                        code: namaste.code.clone(),
                        display: namaste.display.clone(),
                    },
                    Coding {
                        system: ICD11_SYSTEM.to_string(),
                        code: icd.code.clone(),
                        display: icd.display.clone(),
                    },
                ],
            },
            meta: Meta {
                profile: vec![CONDITION_PROFILE.to_string()],
            },
        }
    }

    /// Returns the first coding whose system equals `system`.
    pub fn coding(&self, system: &str) -> Option<&Coding> {
        self.code.coding.iter().find(|c| c.system == system)
    }
}
