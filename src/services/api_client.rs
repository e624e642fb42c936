use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::config::ApiConfig;
use crate::data::record::{RecordId, RecordSet};
use crate::error::{ActionError, FetchError};
use crate::services::{FetchService, RowActionService};

/// Error payload returned by the opportunity service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking HTTP client for the opportunity service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    fetch_path: String,
    action_path: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let defaults = ApiConfig::default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetch_path: defaults.fetch_path,
            action_path: defaults.action_path,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_path: config.fetch_path.clone(),
            action_path: config.action_path.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_url(&self) -> String {
        format!("{}{}", self.base_url, self.fetch_path)
    }

    fn action_url(&self, id: &RecordId) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.action_path.replace("{id}", id.as_str())
        )
    }
}

impl FetchService for ApiClient {
    fn fetch(&self, query: &str) -> Result<RecordSet, FetchError> {
        let url = self.fetch_url();
        debug!(target: "api", "GET {} searchKey={:?}", url, query);

        let response = self.client.get(&url).query(&[("searchKey", query)]).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!(target: "api", "Fetch failed with {}", status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let records: RecordSet = serde_json::from_str(&body)?;
        debug!(target: "api", "Received {} records", records.len());
        Ok(records)
    }
}

impl RowActionService for ApiClient {
    fn invoke(&self, id: &RecordId) -> Result<(), ActionError> {
        let url = self.action_url(id);
        debug!(target: "api", "POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "theRecordId": id }))
            .send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        warn!(target: "api", "Row action on {} failed with {}", id, status);
        Err(ActionError::Rejected {
            message: extract_error_message(status.as_u16(), &body),
        })
    }
}

/// Pull the user-facing message out of an error response
fn extract_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}
