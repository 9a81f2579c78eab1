//! NAMASTE and ICD-11 code catalogs.
//!
//! [`Catalog::standard`] is the single canonical copy of the bundled catalog data. The
//! store starts from it, and [`StaticCatalogSource`](crate::StaticCatalogSource) serves it
//! when a refresh is requested.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Traditional medicine system a NAMASTE code originates from.
///
/// Systems outside the known set are preserved verbatim in [`TraditionalSystem::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TraditionalSystem {
    Ayurveda,
    Siddha,
    Unani,
    Homeopathy,
    Other(String),
}

impl TraditionalSystem {
    pub fn as_str(&self) -> &str {
        match self {
            TraditionalSystem::Ayurveda => "Ayurveda",
            TraditionalSystem::Siddha => "Siddha",
            TraditionalSystem::Unani => "Unani",
            TraditionalSystem::Homeopathy => "Homeopathy",
            TraditionalSystem::Other(name) => name,
        }
    }
}

impl From<String> for TraditionalSystem {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Ayurveda" => TraditionalSystem::Ayurveda,
            "Siddha" => TraditionalSystem::Siddha,
            "Unani" => TraditionalSystem::Unani,
            "Homeopathy" => TraditionalSystem::Homeopathy,
            _ => TraditionalSystem::Other(value),
        }
    }
}

impl From<TraditionalSystem> for String {
    fn from(value: TraditionalSystem) -> Self {
        match value {
            TraditionalSystem::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TraditionalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A NAMASTE condition code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamasteCode {
    pub code: String,
    pub name: String,
    pub description: String,
    pub system: TraditionalSystem,
}

/// An ICD-11 code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdCode {
    pub code: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
}

/// The two code catalogs the mapping workflow searches.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Catalog {
    pub namaste: Vec<NamasteCode>,
    pub icd: Vec<IcdCode>,
}

const STANDARD_NAMASTE: &[(&str, &str, &str, &str)] = &[
    (
        "NAM-AYU-103",
        "Jvara",
        "Fever condition in Ayurveda, characterized by elevated body temperature",
        "Ayurveda",
    ),
    (
        "NAM-AYU-201",
        "Prameha",
        "Metabolic disorder similar to diabetes in Ayurveda",
        "Ayurveda",
    ),
    (
        "NAM-SID-301",
        "Vatha Noi",
        "Joint pain and arthritis-like condition in Siddha medicine",
        "Siddha",
    ),
    (
        "NAM-HOM-501",
        "Arsenicum Album",
        "Homeopathy remedy for digestive and anxiety conditions",
        "Homeopathy",
    ),
    (
        "NAM-AYU-104",
        "Kasa",
        "Cough and respiratory conditions in Ayurveda",
        "Ayurveda",
    ),
    (
        "NAM-AYU-202",
        "Shotha",
        "Inflammatory swelling conditions in Ayurveda",
        "Ayurveda",
    ),
    (
        "NAM-SID-302",
        "Mega Noi",
        "Brain and neurological disorders in Siddha",
        "Siddha",
    ),
    (
        "NAM-HOM-502",
        "Belladonna",
        "Homeopathy remedy for acute inflammatory conditions",
        "Homeopathy",
    ),
];

const STANDARD_ICD: &[(&str, &str, &str)] = &[
    (
        "1D44",
        "Fever of unknown origin",
        "Symptoms, signs and abnormal clinical findings",
    ),
    (
        "5A11",
        "Type 2 Diabetes Mellitus",
        "Endocrine, nutritional and metabolic diseases",
    ),
    (
        "FA20",
        "Rheumatoid Arthritis",
        "Diseases of the musculoskeletal system",
    ),
    (
        "XM123456",
        "Homeopathy – remedy related condition",
        "Traditional medicine codes",
    ),
    (
        "CA40",
        "Cough",
        "Symptoms, signs and abnormal clinical findings",
    ),
    (
        "ME84",
        "Localised swelling, mass or lump",
        "Symptoms, signs and abnormal clinical findings",
    ),
    (
        "8E4Z",
        "Neurological disorder, unspecified",
        "Diseases of the nervous system",
    ),
    (
        "1A00",
        "Acute inflammatory disorders",
        "Certain infectious or parasitic diseases",
    ),
];

impl Catalog {
    /// The bundled NAMASTE and ICD-11 catalogs.
    pub fn standard() -> Self {
        let namaste = STANDARD_NAMASTE
            .iter()
            .map(|&(code, name, description, system)| NamasteCode {
                code: code.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                system: TraditionalSystem::from(system.to_string()),
            })
            .collect();

        let icd = STANDARD_ICD
            .iter()
            .map(|&(code, name, category)| IcdCode {
                code: code.to_string(),
                name: name.to_string(),
                category: category.to_string(),
                chapter: None,
            })
            .collect();

        Self { namaste, icd }
    }

    pub fn find_namaste(&self, code: &str) -> Option<&NamasteCode> {
        self.namaste.iter().find(|c| c.code == code)
    }

    pub fn find_icd(&self, code: &str) -> Option<&IcdCode> {
        self.icd.iter().find(|c| c.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_codes_are_unique() {
        let catalog = Catalog::standard();

        let namaste: HashSet<_> = catalog.namaste.iter().map(|c| &c.code).collect();
        let icd: HashSet<_> = catalog.icd.iter().map(|c| &c.code).collect();

        assert_eq!(namaste.len(), catalog.namaste.len());
        assert_eq!(icd.len(), catalog.icd.len());
        assert_eq!(catalog.namaste.len(), 8);
        assert_eq!(catalog.icd.len(), 8);
    }

    #[test]
    fn finds_codes_by_exact_key() {
        let catalog = Catalog::standard();

        assert_eq!(
            catalog.find_namaste("NAM-SID-301").map(|c| c.name.as_str()),
            Some("Vatha Noi")
        );
        assert_eq!(
            catalog.find_icd("5A11").map(|c| c.name.as_str()),
            Some("Type 2 Diabetes Mellitus")
        );
        assert!(catalog.find_namaste("nam-sid-301").is_none());
    }

    #[test]
    fn unknown_systems_round_trip_verbatim() {
        let json = r#"{"code":"NAM-SOW-601","name":"Sowa","description":"d","system":"Sowa-Rigpa"}"#;
        let code: NamasteCode = serde_json::from_str(json).expect("parse");

        assert_eq!(code.system, TraditionalSystem::Other("Sowa-Rigpa".into()));
        assert_eq!(serde_json::to_string(&code).expect("render"), json);
    }

    #[test]
    fn icd_chapter_is_omitted_when_absent() {
        let catalog = Catalog::standard();
        let json = serde_json::to_value(&catalog.icd[0]).expect("render");
        assert!(json.get("chapter").is_none());
    }
}
