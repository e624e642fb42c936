//! Configuration module
//!
//! Settings for paging behavior, the opportunity service endpoint and
//! terminal display.

pub mod config;
