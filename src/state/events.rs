//! Controller phases and the events that drive them

use crate::data::record::{RecordId, RecordSet};
use crate::data::sort::SortSpec;

/// Top-level lifecycle of a list controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready(ReadyPhase),
}

/// What a ready controller is doing right now
///
/// Every event is handled to completion, so outside of a handler this is
/// always `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyPhase {
    Stable,
    Filtering,
    Paginating,
    Selecting,
}

/// Events the rendering layer sends back into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SearchChanged(String),
    PageNext,
    PagePrevious,
    /// Rows the table reports as checked within the visible page
    SelectionChanged(RecordSet),
    /// Same payload, but explicitly tagged as the echo of a re-render
    SelectionReseeded(RecordSet),
    RowAction(RecordId),
    SortChanged(Option<SortSpec>),
}

/// Entry in the controller's event history
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    FetchStarted { query: String },
    FetchCompleted { records: usize },
    FetchFailed { error: String },
    View(ViewEvent),
}
