//! In-memory collaborators
//!
//! Handles are cheap clones sharing their recorded state, so a test can keep
//! one copy and box the other into the controller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::data::record::{RecordId, RecordSet};
use crate::error::{ActionError, FetchError};
use crate::services::{FetchService, Notification, NotificationSink, RowActionService};

/// Always answers with the same records, or the same failure
#[derive(Clone)]
pub struct StaticFetchService {
    records: RecordSet,
    failure: Option<String>,
    queries: Rc<RefCell<Vec<String>>>,
}

impl StaticFetchService {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            failure: None,
            queries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.to_string()),
            queries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Search keys seen so far, oldest first
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl FetchService for StaticFetchService {
    fn fetch(&self, query: &str) -> Result<RecordSet, FetchError> {
        self.queries.borrow_mut().push(query.to_string());
        match &self.failure {
            Some(message) => Err(FetchError::Unavailable(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

/// Succeeds for every row except the ones given a scripted rejection
#[derive(Clone, Default)]
pub struct ScriptedActionService {
    rejections: HashMap<RecordId, String>,
    invoked: Rc<RefCell<Vec<RecordId>>>,
}

impl ScriptedActionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(mut self, id: impl Into<RecordId>, message: &str) -> Self {
        self.rejections.insert(id.into(), message.to_string());
        self
    }

    pub fn invoked(&self) -> Vec<RecordId> {
        self.invoked.borrow().clone()
    }
}

impl RowActionService for ScriptedActionService {
    fn invoke(&self, id: &RecordId) -> Result<(), ActionError> {
        self.invoked.borrow_mut().push(id.clone());
        match self.rejections.get(id) {
            Some(message) => Err(ActionError::Rejected {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Keeps every notification it receives
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    received: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}
