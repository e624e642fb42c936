//! Collaborators consumed by the list controller
//!
//! The controller never does I/O itself. Fetching records, running a row
//! action and telling the user about outcomes all go through these traits.

pub mod api_client;
pub mod file_source;
pub mod memory;

use std::fmt;

use crate::data::record::{RecordId, RecordSet};
use crate::error::{ActionError, FetchError};

pub use api_client::ApiClient;
pub use file_source::JsonFileSource;

/// Source of records for a search key
///
/// Any server-side filtering, retry or timeout policy lives behind this.
pub trait FetchService {
    fn fetch(&self, query: &str) -> Result<RecordSet, FetchError>;
}

/// Single-shot remote action on one row
pub trait RowActionService {
    fn invoke(&self, id: &RecordId) -> Result<(), ActionError>;
}

/// Fire-and-forget user notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => f.write_str("Success"),
            NotificationKind::Error => f.write_str("Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error!".to_string(),
            message: message.into(),
        }
    }

    pub fn no_records() -> Self {
        Self::error("No record found")
    }
}
