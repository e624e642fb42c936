use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::config::config::BehaviorConfig;
use crate::data::paginator::Paginator;
use crate::data::record::{Record, RecordId, RecordSet};
use crate::data::record_store::RecordStore;
use crate::data::search_filter::SearchFilter;
use crate::data::sort::SortSpec;
use crate::error::{ActionError, FetchError};
use crate::services::{FetchService, Notification, NotificationSink, RowActionService};
use crate::state::events::{ControllerEvent, Phase, ReadyPhase, ViewEvent};
use crate::state::selection::{ReconcileMode, ReconcileOutcome, SelectionTracker};
use crate::ui::columns::{default_columns, ColumnSpec};
use crate::ui::render_state::RenderState;

/// External services the controller delegates I/O to
pub struct Collaborators {
    pub fetch: Box<dyn FetchService>,
    pub actions: Box<dyn RowActionService>,
    pub notifier: Box<dyn NotificationSink>,
}

/// Orchestrates store, filter, paginator and selection for one table
///
/// Each public method handles one event to completion. Within a handler the
/// order is always: working set, then page, then selection reseed.
pub struct ListController {
    store: RecordStore,
    paginator: Paginator<Record>,
    selection: SelectionTracker,
    /// Identities the table should show as checked, refreshed after every
    /// page or working-set change
    displayed_selection: Vec<RecordId>,
    query: String,
    sort: Option<SortSpec>,
    columns: Vec<ColumnSpec>,
    phase: Phase,
    last_error: Option<FetchError>,
    /// Set by a page change; the next untagged selection report is the
    /// table echoing its reseed, not the user
    reseed_pending: bool,
    refetch_on_search: bool,
    collaborators: Collaborators,
    event_history: VecDeque<ControllerEvent>,
    max_history: usize,
}

impl ListController {
    pub fn new(behavior: &BehaviorConfig, collaborators: Collaborators) -> Self {
        Self {
            store: RecordStore::new(),
            paginator: Paginator::new(behavior.page_size),
            selection: SelectionTracker::new(),
            displayed_selection: Vec::new(),
            query: String::new(),
            sort: None,
            columns: default_columns(),
            phase: Phase::Idle,
            last_error: None,
            reseed_pending: false,
            refetch_on_search: behavior.refetch_on_search,
            collaborators,
            event_history: VecDeque::new(),
            max_history: behavior.max_event_history,
        }
    }

    /// Dispatch an event coming from the rendering layer
    pub fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::SearchChanged(query) => self.search_changed(&query),
            ViewEvent::PageNext => {
                self.next_page();
            }
            ViewEvent::PagePrevious => {
                self.previous_page();
            }
            ViewEvent::SelectionChanged(rows) => {
                self.selection_changed(rows);
            }
            ViewEvent::SelectionReseeded(rows) => {
                self.selection_reseeded(rows);
            }
            ViewEvent::RowAction(id) => {
                // The outcome has already been reported through the notifier
                let _ = self.invoke_row_action(&id);
            }
            ViewEvent::SortChanged(spec) => self.sort_by(spec),
        }
    }

    /// Fetch records for `query` and make them the new store
    pub fn load(&mut self, query: &str) {
        self.record(ControllerEvent::FetchStarted {
            query: query.to_string(),
        });
        self.phase = Phase::Loading;
        let result = self.collaborators.fetch.fetch(query);
        self.on_fetch_result(result);
    }

    /// Apply the outcome of a fetch
    pub fn on_fetch_result(&mut self, result: Result<RecordSet, FetchError>) {
        match result {
            Ok(records) => {
                let fetched = records.len();
                info!(target: "controller", "Fetch returned {} records", fetched);
                self.record(ControllerEvent::FetchCompleted { records: fetched });

                self.store.set_records(records);
                self.last_error = None;
                self.rebuild_working_set();
                self.phase = Phase::Ready(ReadyPhase::Stable);

                if fetched == 0 {
                    self.collaborators.notifier.notify(Notification::no_records());
                }
            }
            Err(error) => {
                warn!(target: "controller", "Fetch failed: {}", error);
                self.record(ControllerEvent::FetchFailed {
                    error: error.to_string(),
                });

                self.store.clear();
                self.paginator.set_working_set(Vec::new());
                self.reseed_pending = false;
                self.reseed_selection();
                self.last_error = Some(error);
                self.phase = Phase::Ready(ReadyPhase::Stable);
            }
        }
    }

    /// Re-filter for a new search key
    ///
    /// Filtering always starts from the full store. With
    /// `refetch_on_search` the store is fetched again first.
    pub fn search_changed(&mut self, query: &str) {
        self.record(ControllerEvent::View(ViewEvent::SearchChanged(
            query.to_string(),
        )));
        self.query = query.to_string();

        if self.refetch_on_search {
            self.load(query);
            return;
        }

        self.enter(ReadyPhase::Filtering);
        self.rebuild_working_set();
        debug!(
            target: "controller",
            "Search {:?} matched {} of {} records",
            self.query,
            self.paginator.len(),
            self.store.len()
        );
        self.settle();
    }

    /// Change the local sort order (None restores fetch order)
    pub fn sort_by(&mut self, spec: Option<SortSpec>) {
        self.record(ControllerEvent::View(ViewEvent::SortChanged(spec.clone())));
        self.enter(ReadyPhase::Filtering);
        self.sort = spec;
        self.rebuild_working_set();
        self.settle();
    }

    /// Returns whether the page changed
    pub fn next_page(&mut self) -> bool {
        self.record(ControllerEvent::View(ViewEvent::PageNext));
        self.enter(ReadyPhase::Paginating);
        let moved = self.paginator.next();
        self.after_navigation(moved)
    }

    /// Returns whether the page changed
    pub fn previous_page(&mut self) -> bool {
        self.record(ControllerEvent::View(ViewEvent::PagePrevious));
        self.enter(ReadyPhase::Paginating);
        let moved = self.paginator.previous();
        self.after_navigation(moved)
    }

    /// Selection report from the table
    ///
    /// Treated as a user change unless a page change armed a reseed, in
    /// which case this one report is reconciled additively.
    pub fn selection_changed(&mut self, visible_selected: RecordSet) -> ReconcileOutcome {
        let mode = if std::mem::take(&mut self.reseed_pending) {
            ReconcileMode::SystemReseed
        } else {
            ReconcileMode::UserSelection
        };
        self.record(ControllerEvent::View(ViewEvent::SelectionChanged(
            visible_selected.clone(),
        )));
        self.reconcile(visible_selected, mode)
    }

    /// Selection report the table has explicitly tagged as a re-render echo
    pub fn selection_reseeded(&mut self, visible_selected: RecordSet) -> ReconcileOutcome {
        self.reseed_pending = false;
        self.record(ControllerEvent::View(ViewEvent::SelectionReseeded(
            visible_selected.clone(),
        )));
        self.reconcile(visible_selected, ReconcileMode::SystemReseed)
    }

    /// Run the remote action for one row and notify the outcome
    pub fn invoke_row_action(&mut self, id: &RecordId) -> Result<(), ActionError> {
        self.record(ControllerEvent::View(ViewEvent::RowAction(id.clone())));
        let label = self
            .store
            .get(id)
            .map(|record| record.name.clone())
            .unwrap_or_else(|| id.to_string());

        match self.collaborators.actions.invoke(id) {
            Ok(()) => {
                info!(target: "controller", "Row action succeeded for {}", id);
                self.collaborators
                    .notifier
                    .notify(Notification::success(format!("{} has been updated!", label)));
                Ok(())
            }
            Err(error) => {
                warn!(target: "controller", "Row action failed for {}: {}", id, error);
                self.collaborators
                    .notifier
                    .notify(Notification::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Snapshot for the rendering layer
    pub fn render_state(&self) -> RenderState {
        RenderState {
            visible_page: self.paginator.visible_page().to_vec(),
            columns: self.columns.clone(),
            selected_identities: self.displayed_selection.clone(),
            range: self.paginator.record_range(),
            page: self.paginator.page(),
            total_pages: self.paginator.total_pages(),
            query: self.query.clone(),
            error: self.last_error.as_ref().map(|e| e.to_string()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn paginator(&self) -> &Paginator<Record> {
        &self.paginator
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn visible_page(&self) -> &[Record] {
        self.paginator.visible_page()
    }

    pub fn is_reseed_pending(&self) -> bool {
        self.reseed_pending
    }

    pub fn event_history(&self) -> impl Iterator<Item = &ControllerEvent> {
        self.event_history.iter()
    }

    fn rebuild_working_set(&mut self) {
        let mut working = SearchFilter::apply(&self.query, &self.store);
        if let Some(spec) = &self.sort {
            spec.apply(&mut working);
        }
        self.paginator.set_working_set(working);
        // The new page is reseeded here, so an echo owed to an earlier page
        // change no longer applies
        self.reseed_pending = false;
        self.reseed_selection();
    }

    fn after_navigation(&mut self, moved: bool) -> bool {
        self.reseed_selection();
        if moved {
            self.reseed_pending = true;
            debug!(
                target: "controller",
                "Page {}/{} ({})",
                self.paginator.page(),
                self.paginator.total_pages(),
                self.paginator.record_range()
            );
        }
        self.settle();
        moved
    }

    fn reconcile(&mut self, visible_selected: RecordSet, mode: ReconcileMode) -> ReconcileOutcome {
        self.enter(ReadyPhase::Selecting);
        let outcome =
            self.selection
                .reconcile(&visible_selected, self.paginator.visible_page(), mode);
        self.reseed_selection();
        self.settle();
        outcome
    }

    fn reseed_selection(&mut self) {
        self.displayed_selection = self.selection.selected_identities();
    }

    // Intermediate phases only apply once the controller is ready
    fn enter(&mut self, phase: ReadyPhase) {
        if matches!(self.phase, Phase::Ready(_)) {
            self.phase = Phase::Ready(phase);
        }
    }

    fn settle(&mut self) {
        if matches!(self.phase, Phase::Ready(_)) {
            self.phase = Phase::Ready(ReadyPhase::Stable);
        }
    }

    fn record(&mut self, event: ControllerEvent) {
        if self.max_history == 0 {
            return;
        }
        self.event_history.push_back(event);
        while self.event_history.len() > self.max_history {
            self.event_history.pop_front();
        }
    }
}
