use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::data::record::{Record, RecordId};

/// Where a selection report from the rendering layer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// The user checked or unchecked rows on the visible page
    UserSelection,
    /// The table re-rendered after a page or data change and echoed the
    /// selection it was seeded with; absence means nothing here
    SystemReseed,
}

/// What a reconciliation pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub added: usize,
    pub removed: usize,
}

/// Rows selected across every page and filter state seen so far
///
/// Keyed by [`RecordId`]; identity of the `Record` value or its position in
/// any page is irrelevant. Only an explicit user deselection on the page
/// that shows the row removes it.
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    order: Vec<RecordId>,
    records: HashMap<RecordId, Record>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the rendering layer's view of the visible selection into the set
    ///
    /// Every record in `visible_selected` is added, or refreshed if already
    /// tracked. With [`ReconcileMode::UserSelection`], tracked rows that are
    /// on `visible_page` but missing from `visible_selected` are removed;
    /// rows on other pages are never touched.
    pub fn reconcile(
        &mut self,
        visible_selected: &[Record],
        visible_page: &[Record],
        mode: ReconcileMode,
    ) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        for record in visible_selected {
            if self
                .records
                .insert(record.id.clone(), record.clone())
                .is_none()
            {
                self.order.push(record.id.clone());
                outcome.added += 1;
            }
        }

        if mode == ReconcileMode::UserSelection {
            let reported: HashSet<&RecordId> = visible_selected.iter().map(|r| &r.id).collect();
            for record in visible_page {
                if !reported.contains(&record.id) && self.records.remove(&record.id).is_some() {
                    outcome.removed += 1;
                }
            }
            if outcome.removed > 0 {
                self.order.retain(|id| self.records.contains_key(id));
            }
        }

        debug!(
            target: "selection",
            "Reconciled ({:?}): +{} -{}, {} selected",
            mode,
            outcome.added,
            outcome.removed,
            self.order.len()
        );
        outcome
    }

    /// Identities of every selected row, in the order they were first selected
    pub fn selected_identities(&self) -> Vec<RecordId> {
        self.order.clone()
    }

    pub fn selected_records(&self) -> Vec<&Record> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<Record> {
        ids.iter().map(|id| Record::new(*id, format!("Opp {}", id))).collect()
    }

    fn ids(tracker: &SelectionTracker) -> Vec<String> {
        tracker
            .selected_identities()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_user_selection_adds_in_order() {
        let page = rows(&["1", "2", "3"]);
        let mut tracker = SelectionTracker::new();

        let outcome = tracker.reconcile(&rows(&["3", "1"]), &page, ReconcileMode::UserSelection);
        assert_eq!(outcome, ReconcileOutcome { added: 2, removed: 0 });
        assert_eq!(ids(&tracker), vec!["3", "1"]);
    }

    #[test]
    fn test_user_deselection_removes_only_visible_rows() {
        let page_one = rows(&["1", "2"]);
        let page_two = rows(&["3", "4"]);
        let mut tracker = SelectionTracker::new();

        tracker.reconcile(&rows(&["1"]), &page_one, ReconcileMode::UserSelection);
        tracker.reconcile(&rows(&["3", "4"]), &page_two, ReconcileMode::UserSelection);
        let outcome = tracker.reconcile(&rows(&["4"]), &page_two, ReconcileMode::UserSelection);

        assert_eq!(outcome.removed, 1);
        assert_eq!(ids(&tracker), vec!["1", "4"]);
    }

    #[test]
    fn test_empty_user_report_clears_visible_page_only() {
        let page_one = rows(&["1", "2"]);
        let page_two = rows(&["3"]);
        let mut tracker = SelectionTracker::new();

        tracker.reconcile(&rows(&["1", "2"]), &page_one, ReconcileMode::UserSelection);
        tracker.reconcile(&rows(&["3"]), &page_two, ReconcileMode::UserSelection);
        tracker.reconcile(&[], &page_two, ReconcileMode::UserSelection);

        assert_eq!(ids(&tracker), vec!["1", "2"]);
    }

    #[test]
    fn test_system_reseed_never_removes() {
        let page = rows(&["1", "2"]);
        let mut tracker = SelectionTracker::new();

        tracker.reconcile(&rows(&["1", "2"]), &page, ReconcileMode::UserSelection);
        let outcome = tracker.reconcile(&[], &page, ReconcileMode::SystemReseed);

        assert_eq!(outcome, ReconcileOutcome::default());
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_reselect_refreshes_record_without_duplicating() {
        let page = rows(&["1"]);
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&page, &page, ReconcileMode::UserSelection);

        let updated = vec![Record::new("1", "Renamed")];
        let outcome = tracker.reconcile(&updated, &page, ReconcileMode::UserSelection);

        assert_eq!(outcome.added, 0);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.selected_records()[0].name, "Renamed");
    }

    #[test]
    fn test_shared_names_do_not_collide() {
        let page = vec![Record::new("1", "Renewal"), Record::new("2", "Renewal")];
        let mut tracker = SelectionTracker::new();
        tracker.reconcile(&page, &page, ReconcileMode::UserSelection);
        tracker.reconcile(&page[1..], &page, ReconcileMode::UserSelection);

        assert!(!tracker.is_selected(&RecordId::from("1")));
        assert!(tracker.is_selected(&RecordId::from("2")));
    }
}
