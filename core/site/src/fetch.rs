//! Fetching the user collection from the remote data source.
//!
//! The source is a read-only REST endpoint returning a JSON array of user
//! rows. Every failure class maps to a [`FetchError`] variant; the refresh
//! loop treats all of them as "no data this tick" and falls back, so none of
//! these ever reach the user.

use dinopal_protocol::UserRecord;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    /// 400/404: the backing table does not exist yet. Expected on fresh
    /// deployments, logged at debug and treated like an empty result.
    #[error("data source not provisioned yet")]
    NotProvisioned,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    BadStatus(u16),

    #[error("malformed response body: {0}")]
    BadBody(String),
}

impl FetchError {
    /// Benign errors mean "nothing there yet" rather than "something broke".
    pub fn is_benign(&self) -> bool {
        matches!(self, FetchError::NotProvisioned)
    }
}

/// Maps a non-success HTTP status to its error class.
pub fn classify_status(status: u16) -> FetchError {
    match status {
        400 | 404 => FetchError::NotProvisioned,
        other => FetchError::BadStatus(other),
    }
}

pub trait UserDirectory: Send {
    fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError>;
}

pub struct HttpUserDirectory {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl HttpUserDirectory {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| format!("Failed to build fetch client: {}", err))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

impl UserDirectory for HttpUserDirectory {
    fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        if self.endpoint.is_empty() {
            return Err(FetchError::NotProvisioned);
        }

        let url = format!(
            "{}/rest/v1/users?select=*&order=last_activity.desc",
            self.endpoint
        );
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status.as_u16()));
        }

        let records: Vec<UserRecord> = response
            .json()
            .map_err(|err| FetchError::BadBody(err.to_string()))?;
        debug!(users = records.len(), "Fetched user collection");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_statuses_are_benign() {
        assert!(classify_status(400).is_benign());
        assert!(classify_status(404).is_benign());
    }

    #[test]
    fn other_statuses_are_hard_failures() {
        match classify_status(500) {
            FetchError::BadStatus(500) => {}
            other => panic!("unexpected classification: {other:?}"),
        }
        assert!(!classify_status(500).is_benign());
        assert!(!classify_status(503).is_benign());
    }

    #[test]
    fn unconfigured_endpoint_reads_as_not_provisioned() {
        let directory =
            HttpUserDirectory::new(String::new(), String::new()).expect("directory");
        assert!(matches!(
            directory.fetch_users(),
            Err(FetchError::NotProvisioned)
        ));
    }
}
