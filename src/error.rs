//! Error types for the list engine and its collaborators
//!
//! None of these are fatal: the controller stays usable after any of them.
//! Page overflow and empty filter results are not errors at all.

use thiserror::Error;

/// Remote (or file) record retrieval failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode records: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// A row action was not carried out
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service refused the action; `message` is shown to the user verbatim
    #[error("{message}")]
    Rejected { message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("behavior.page_size must be greater than zero")]
    ZeroPageSize,

    #[error("api.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("api.action_path must contain an {{id}} placeholder")]
    MissingIdPlaceholder,
}
