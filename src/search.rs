//! Keyword search over displayed records.
//!
//! This is the list filter the display layer runs before asking the
//! controller for a new state: the number of matches becomes the `item_count`
//! argument of [`InfoStateController::filter`](crate::view_state::InfoStateController::filter).

use crate::models::Record;

/// Case-insensitive substring match against site name, county and status.
///
/// An empty (or all-whitespace) keyword matches everything.
pub fn matches_keyword(record: &Record, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&record.site_name, &record.county, &record.status]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching `keyword`, in their original order.
pub fn search<'a>(records: &'a [Record], keyword: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| matches_keyword(record, keyword))
        .collect()
}
