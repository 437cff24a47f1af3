//! The filter engine: a pure, order-preserving predicate over records.

use compass_model::{ComplianceRecord, FilterCriteria};

/// Check if text matches a search filter (case-insensitive).
///
/// Returns `true` if the filter is empty or `text` contains it.
///
/// # Example
///
/// ```
/// use compass_core::matches_search;
///
/// assert!(matches_search("Access Control", "access"));
/// assert!(matches_search("Access Control", ""));
/// assert!(!matches_search("Access Control", "logging"));
/// ```
pub fn matches_search(text: &str, filter: &str) -> bool {
    filter.is_empty() || text.to_lowercase().contains(&filter.to_lowercase())
}

/// True when `record` passes the search, standard and category predicates.
pub fn matches_criteria(record: &ComplianceRecord, criteria: &FilterCriteria) -> bool {
    let needle = criteria.search.to_lowercase();
    matches_lowered(record, criteria, &needle)
}

/// Filter `records` by `criteria`, keeping the original order.
pub fn apply<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a ComplianceRecord>
where
    I: IntoIterator<Item = &'a ComplianceRecord>,
{
    let needle = criteria.search.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_lowered(record, criteria, &needle))
        .collect()
}

fn matches_lowered(record: &ComplianceRecord, criteria: &FilterCriteria, needle: &str) -> bool {
    let search_match = needle.is_empty()
        || [&record.id, &record.title, &record.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle));
    let standard_match = criteria.standard.is_empty() || record.standard == criteria.standard;
    let category_match = criteria.category.is_empty() || record.category == criteria.category;
    search_match && standard_match && category_match
}
