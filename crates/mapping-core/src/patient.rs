//! Registered patients.

use crate::error::ParseEnumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ParseEnumError {
                kind: "gender",
                value: s.to_string(),
                expected: "male, female, other",
            }),
        }
    }
}

/// A registered patient. Never modified after registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for registering a patient.
///
/// Values are stored as given; range and format checks are the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_camel_case_and_millisecond_timestamp() {
        let patient = Patient {
            id: "PAT-1".into(),
            name: "Asha Rao".into(),
            age: 42,
            gender: Gender::Female,
            contact: "+91 98450 00000".into(),
            created_at: "2026-10-19T12:00:00.123456Z"
                .parse::<DateTime<Utc>>()
                .expect("valid datetime"),
        };

        let json = serde_json::to_value(&patient).expect("serialise");
        assert_eq!(json["createdAt"], "2026-10-19T12:00:00.123Z");
        assert_eq!(json["gender"], "female");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn gender_parses_lowercase_names_only() {
        assert_eq!("other".parse::<Gender>(), Ok(Gender::Other));
        let err = "Male".parse::<Gender>().expect_err("case sensitive");
        assert!(err.to_string().contains("male, female, other"));
    }
}
