//! Snapshot handed to the rendering layer after every event

use crate::data::paginator::RecordRange;
use crate::data::record::{Record, RecordId};
use crate::ui::columns::ColumnSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub visible_page: Vec<Record>,
    pub columns: Vec<ColumnSpec>,
    /// Every selected identity across all pages; the table checks the
    /// ones it is currently showing
    pub selected_identities: Vec<RecordId>,
    pub range: RecordRange,
    pub page: usize,
    pub total_pages: usize,
    pub query: String,
    pub error: Option<String>,
}

impl RenderState {
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected_identities.contains(id)
    }

    /// Rows of the visible page that should render as checked
    pub fn visible_selected(&self) -> Vec<Record> {
        self.visible_page
            .iter()
            .filter(|record| self.is_selected(&record.id))
            .cloned()
            .collect()
    }

    pub fn find_visible(&self, id: &RecordId) -> Option<&Record> {
        self.visible_page.iter().find(|record| &record.id == id)
    }
}
