use crate::data::record::{Record, RecordSet};
use crate::data::record_store::RecordStore;

/// Free-text filter over the record store
pub struct SearchFilter;

impl SearchFilter {
    /// Derive the working set for `query` from the full store
    ///
    /// An empty query returns the store unchanged. Otherwise a record is
    /// kept when its serialized form contains `query` (case-sensitive).
    /// The result keeps store order and never depends on earlier queries.
    pub fn apply(query: &str, store: &RecordStore) -> RecordSet {
        if query.is_empty() {
            return store.records().to_vec();
        }

        store
            .iter_with_text()
            .filter(|(_, text)| text.contains(query))
            .map(|(record, _)| record.clone())
            .collect()
    }

    /// Check a single record without going through a store
    pub fn matches(query: &str, record: &Record) -> bool {
        query.is_empty() || record.search_text().contains(query)
    }
}
