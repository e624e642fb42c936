//! Data layer
//!
//! Records, the store they live in, and the pure transforms that turn the
//! store into the page the user sees: filter, sort, paginate.

pub mod paginator;
pub mod record;
pub mod record_store;
pub mod search_filter;
pub mod sort;
