//! Case-insensitive substring search over the code catalogs.
//!
//! An empty query returns the whole catalog. Results keep catalog order; there is no
//! ranking.

use crate::catalog::{IcdCode, NamasteCode};

/// Matches `query` against code, name and description.
pub fn search_namaste_codes(codes: &[NamasteCode], query: &str) -> Vec<NamasteCode> {
    filter_by(codes, query, |c| [&c.code, &c.name, &c.description])
}

/// Matches `query` against code, name and category.
pub fn search_icd_codes(codes: &[IcdCode], query: &str) -> Vec<IcdCode> {
    filter_by(codes, query, |c| [&c.code, &c.name, &c.category])
}

fn filter_by<T, F>(items: &[T], query: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> [&String; 3],
{
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            fields(item)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Case-insensitive containment used by record listings as well as catalog search.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
