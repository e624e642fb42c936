use std::collections::HashSet;
use tracing::{debug, warn};

use crate::data::record::{Record, RecordId, RecordSet};

/// The full, unfiltered record list from the last fetch
///
/// Replaced wholesale on every fetch; never merged or patched in place.
/// The serialized search text of each record is computed once here so
/// that re-filtering on every keystroke does not re-serialize the store.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: RecordSet,
    search_text: Vec<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the store contents
    ///
    /// Records whose id was already seen earlier in `records` are dropped.
    pub fn set_records(&mut self, records: RecordSet) {
        let incoming = records.len();
        let mut seen: HashSet<RecordId> = HashSet::with_capacity(incoming);
        let kept: RecordSet = records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();

        if kept.len() < incoming {
            warn!(
                target: "record_store",
                "Dropped {} records with duplicate ids",
                incoming - kept.len()
            );
        }

        self.search_text = kept.iter().map(Record::search_text).collect();
        self.records = kept;
        debug!(target: "record_store", "Store now holds {} records", self.records.len());
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.search_text.clear();
    }

    /// Whether the last fetch produced zero records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Records paired with their cached search text, in store order
    pub fn iter_with_text(&self) -> impl Iterator<Item = (&Record, &str)> {
        self.records
            .iter()
            .zip(self.search_text.iter().map(String::as_str))
    }
}
