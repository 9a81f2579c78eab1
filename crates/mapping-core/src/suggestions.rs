//! Static NAMASTE → ICD-11 suggestion table.

use crate::mapping::MappingType;
use serde::{Deserialize, Serialize};

/// A candidate ICD-11 code for a NAMASTE code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    pub icd_code: String,
    pub match_type: MappingType,
    /// Percentage, 0–100.
    pub confidence: u8,
}

// (namaste code, icd code, match type, confidence)
const SUGGESTIONS: &[(&str, &str, MappingType, u8)] = &[
    ("NAM-AYU-103", "1D44", MappingType::Exact, 95),
    ("NAM-AYU-201", "5A11", MappingType::Approximate, 85),
    ("NAM-SID-301", "FA20", MappingType::Approximate, 80),
    ("NAM-HOM-501", "XM123456", MappingType::Partial, 75),
    ("NAM-AYU-104", "CA40", MappingType::Exact, 90),
    ("NAM-AYU-202", "ME84", MappingType::Approximate, 82),
    ("NAM-SID-302", "8E4Z", MappingType::Approximate, 78),
    ("NAM-HOM-502", "1A00", MappingType::Approximate, 85),
];

/// Suggestions configured for `namaste_code`, in table order. Unknown codes yield none.
pub fn suggestions_for(namaste_code: &str) -> Vec<MappingSuggestion> {
    SUGGESTIONS
        .iter()
        .filter(|(namaste, ..)| *namaste == namaste_code)
        .map(|&(_, icd_code, match_type, confidence)| MappingSuggestion {
            icd_code: icd_code.to_string(),
            match_type,
            confidence,
        })
        .collect()
}

/// Match type to preselect when pairing `namaste_code` with `icd_code`.
///
/// Uses the suggestion for that exact pair when one exists, otherwise
/// [`MappingType::Exact`].
pub fn suggested_mapping_type(namaste_code: &str, icd_code: &str) -> MappingType {
    suggestions_for(namaste_code)
        .into_iter()
        .find(|s| s.icd_code == icd_code)
        .map(|s| s.match_type)
        .unwrap_or_default()
}
