//! Mapping records: one NAMASTE code paired with one ICD-11 code for a patient.

use crate::error::ParseEnumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared fidelity of a NAMASTE → ICD-11 mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    #[default]
    Exact,
    Approximate,
    Partial,
}

impl MappingType {
    pub const ALL: [MappingType; 3] = [
        MappingType::Exact,
        MappingType::Approximate,
        MappingType::Partial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MappingType::Exact => "exact",
            MappingType::Approximate => "approximate",
            MappingType::Partial => "partial",
        }
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MappingType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "mapping type",
                value: s.to_string(),
                expected: "exact, approximate, partial",
            })
    }
}

/// A stored mapping with its FHIR `Condition` snapshot.
///
/// Code names are denormalized copies taken when the record was created, and
/// `fhir_data` is derived from them at the same moment. There is no update operation, so
/// the snapshot cannot drift from the record fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    pub id: String,
    pub patient_id: String,
    pub namaste_code: String,
    pub namaste_name: String,
    pub icd_code: String,
    pub icd_name: String,
    pub mapping_type: MappingType,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    pub fhir_data: fhir::Condition,
}

/// Caller-supplied fields for a new mapping record.
///
/// Nothing here is checked against the catalogs or the patient list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMappingRecord {
    pub patient_id: String,
    pub namaste_code: String,
    pub namaste_name: String,
    pub icd_code: String,
    pub icd_name: String,
    pub mapping_type: MappingType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_type_text_round_trip() {
        for t in MappingType::ALL {
            assert_eq!(t.as_str().parse::<MappingType>(), Ok(t));
        }
        assert!("fuzzy".parse::<MappingType>().is_err());
    }

    #[test]
    fn mapping_type_serialises_lowercase() {
        let json = serde_json::to_string(&MappingType::Approximate).expect("serialise");
        assert_eq!(json, "\"approximate\"");
    }
}
