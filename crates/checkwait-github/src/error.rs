//! Error types for checkwait-github

use checkwait_core::CheckWaitError;
use thiserror::Error;

/// Errors that can occur talking to the GitHub API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Request could not be built or sent
    #[error("HTTP error: {0}")]
    Http(String),

    /// API answered with a non-success status
    #[error("GitHub API returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body is not the expected shape
    #[error("Invalid check-runs response: {0}")]
    Decode(String),

    /// API base URL cannot be used to build request URLs
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        GitHubError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(err: serde_json::Error) -> Self {
        GitHubError::Decode(err.to_string())
    }
}

impl From<GitHubError> for CheckWaitError {
    fn from(err: GitHubError) -> Self {
        CheckWaitError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_becomes_transport_error() {
        let err: CheckWaitError = GitHubError::Status {
            status: 403,
            url: "https://api.github.com/repos/o/r/commits/main/check-runs".to_string(),
            message: "API rate limit exceeded".to_string(),
        }
        .into();

        match err {
            CheckWaitError::Transport(msg) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("rate limit"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
