//! Record filtering by grouping key and free-text query

use crate::models::{FilterSelection, TransactionRecord};

/// Keep the records matching a selection.
///
/// A record survives iff its grouping key is in `included_keys` and, when a
/// description query is set, its description contains the query
/// case-insensitively. Input order is preserved; this is a pure predicate
/// filter, not a sort.
///
/// An empty `included_keys` set yields an empty result. The unfiltered view
/// comes from initializing the selection with [`FilterSelection::all_of`].
pub fn filter(records: &[TransactionRecord], selection: &FilterSelection) -> Vec<TransactionRecord> {
    let query = selection
        .description_query
        .as_deref()
        .map(|q| q.to_lowercase());

    records
        .iter()
        .filter(|r| selection.included_keys.contains(&r.group))
        .filter(|r| match &query {
            None => true,
            Some(q) => r
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(q)),
        })
        .cloned()
        .collect()
}
