use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single fetch-and-decode call against the GitHub API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API returned: {0}")]
    Status(StatusCode),

    #[error("Failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
