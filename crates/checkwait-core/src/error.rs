//! Error taxonomy for a check-wait invocation.
//!
//! Every variant is terminal: an invocation either settles or fails with
//! exactly one of these.

use crate::gate::ConclusionMismatch;

/// Errors that end a check-wait invocation.
#[derive(Debug, thiserror::Error)]
pub enum CheckWaitError {
    /// Malformed or inconsistent configuration, detected before any network access.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The deadline passed before the checks reached the expected statuses.
    #[error("timed out after {timeout_secs}s waiting for check runs")]
    Timeout { timeout_secs: u64 },

    /// Checks settled but at least one conclusion differs from expectation.
    #[error("check conclusions do not match: {}", join_mismatches(.mismatches))]
    ConclusionMismatch { mismatches: Vec<ConclusionMismatch> },

    /// The remote listing call failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Writing outputs failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CheckWaitError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        CheckWaitError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

fn join_mismatches(mismatches: &[ConclusionMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for check-wait operations.
pub type Result<T> = std::result::Result<T, CheckWaitError>;
