//! Read-only views over patients and mapping records.
//!
//! These back the problem list, the filtered record listing and the analytics summary.
//! Nothing here mutates the store.

use crate::constants::{TOP_CONDITIONS_LIMIT, UNKNOWN_PATIENT_NAME};
use crate::error::ParseEnumError;
use crate::mapping::{MappingRecord, MappingType};
use crate::patient::Patient;
use crate::search::contains_ignore_case;
use serde::Serialize;
use std::str::FromStr;

/// Which match types a listing includes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MappingType),
}

impl TypeFilter {
    pub fn matches(self, mapping_type: MappingType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => t == mapping_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(TypeFilter::All);
        }
        s.parse::<MappingType>()
            .map(TypeFilter::Only)
            .map_err(|_| ParseEnumError {
                kind: "type filter",
                value: s.to_string(),
                expected: "all, exact, approximate, partial",
            })
    }
}

/// Criteria for [`filter_records`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordFilter<'a> {
    /// Matched case-insensitively against both codes, both names and the patient's name.
    /// Empty matches everything.
    pub search: &'a str,
    pub mapping_type: TypeFilter,
}

/// Records whose `patient_id` equals `patient_id`, in store order.
pub fn records_for_patient<'r>(
    records: &'r [MappingRecord],
    patient_id: &str,
) -> Vec<&'r MappingRecord> {
    records
        .iter()
        .filter(|r| r.patient_id == patient_id)
        .collect()
}

/// Name shown for `patient_id`, or `Unknown Patient` when it is not registered.
pub fn patient_display_name<'p>(patients: &'p [Patient], patient_id: &str) -> &'p str {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map_or(UNKNOWN_PATIENT_NAME, |p| p.name.as_str())
}

pub fn filter_records<'r>(
    records: &'r [MappingRecord],
    patients: &[Patient],
    filter: &RecordFilter<'_>,
) -> Vec<&'r MappingRecord> {
    let needle = filter.search.to_lowercase();

    records
        .iter()
        .filter(|r| filter.mapping_type.matches(r.mapping_type))
        .filter(|r| {
            needle.is_empty()
                || [
                    r.namaste_code.as_str(),
                    r.namaste_name.as_str(),
                    r.icd_code.as_str(),
                    r.icd_name.as_str(),
                    patient_display_name(patients, &r.patient_id),
                ]
                .iter()
                .any(|field| contains_ignore_case(field, &needle))
        })
        .collect()
}

/// Summary figures over every mapping record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingAnalytics {
    pub total: usize,
    pub exact: usize,
    pub approximate: usize,
    pub partial: usize,
    /// Counts per traditional system segment of the NAMASTE code (`AYU`, `SID`, ...), in
    /// first-seen order.
    pub by_system: Vec<(String, usize)>,
    /// Most frequent NAMASTE names, highest count first.
    pub top_conditions: Vec<(String, usize)>,
}

impl MappingAnalytics {
    pub fn from_records(records: &[MappingRecord]) -> Self {
        let mut analytics = Self {
            total: records.len(),
            ..Self::default()
        };

        let mut conditions: Vec<(String, usize)> = Vec::new();
        for record in records {
            match record.mapping_type {
                MappingType::Exact => analytics.exact += 1,
                MappingType::Approximate => analytics.approximate += 1,
                MappingType::Partial => analytics.partial += 1,
            }
            bump(&mut analytics.by_system, system_segment(&record.namaste_code));
            bump(&mut conditions, &record.namaste_name);
        }

        // Stable sort keeps first-seen order among equal counts.
        conditions.sort_by(|a, b| b.1.cmp(&a.1));
        conditions.truncate(TOP_CONDITIONS_LIMIT);
        analytics.top_conditions = conditions;

        analytics
    }

    /// Whole-number share of `count` in the total; 0 when there are no records.
    pub fn percentage(&self, count: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        ((count as f64 / self.total as f64) * 100.0).round() as usize
    }
}

fn system_segment(code: &str) -> &str {
    code.split('-').nth(1).unwrap_or("UNKNOWN")
}

fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}
