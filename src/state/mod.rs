//! List state
//!
//! The selection tracker, controller phases and events, and the
//! `ListController` that ties data, selection and collaborators together.

pub mod controller;
pub mod events;
pub mod selection;

pub use controller::{Collaborators, ListController};
pub use events::{ControllerEvent, Phase, ReadyPhase, ViewEvent};
pub use selection::{ReconcileMode, ReconcileOutcome, SelectionTracker};
