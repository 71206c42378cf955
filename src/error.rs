// Error types for hubstats.
// Classifies GitHub API failures and wraps cache, transport, and decoding errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Repository '{repo}' of user '{owner}' not found")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("API rate limit exceeded; increase your rate limit by supplying a token")]
    RateLimitExceeded,

    #[error("Bad credentials were provided for the API")]
    BadCredentials,

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Statistics for {endpoint} are still being computed, try again shortly")]
    StatsPending { endpoint: String },

    #[error("{dataset} pagination stopped after {max_pages} non-empty pages")]
    PageLimitExceeded { dataset: String, max_pages: u32 },

    #[error("Unexpected response shape from {endpoint}: {source}")]
    Payload {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache file {path} has columns [{found}], expected [{expected}]")]
    CacheSchema {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HubError>;
