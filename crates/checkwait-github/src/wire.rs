//! Wire shapes of the "list check runs for a Git reference" response.

use checkwait_core::{CheckConclusion, CheckSnapshot, CheckStatus, ObservedCheck};
use serde::Deserialize;

use crate::error::GitHubError;

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRunsPage {
    pub total_count: u64,
    #[serde(default)]
    pub check_runs: Vec<CheckRun>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRun {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
}

/// Error body returned by the API on failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    pub message: String,
}

/// Map a reported status onto the closed status set.
///
/// `waiting`, `requested` and `pending` are states of a run that has not
/// started yet and fold to `queued`.
pub(crate) fn decode_status(raw: &str) -> Result<CheckStatus, GitHubError> {
    match raw {
        "waiting" | "requested" | "pending" => Ok(CheckStatus::Queued),
        other => other
            .parse::<CheckStatus>()
            .map_err(|e| GitHubError::Decode(e.to_string())),
    }
}

pub(crate) fn decode_conclusion(raw: Option<&str>) -> Result<Option<CheckConclusion>, GitHubError> {
    raw.map(|value| {
        value
            .parse::<CheckConclusion>()
            .map_err(|e| GitHubError::Decode(e.to_string()))
    })
    .transpose()
}

impl CheckRun {
    fn into_observed(self) -> Result<ObservedCheck, GitHubError> {
        Ok(ObservedCheck {
            id: self.id,
            status: decode_status(&self.status)?,
            conclusion: decode_conclusion(self.conclusion.as_deref())?,
            name: self.name,
        })
    }
}

impl CheckRunsPage {
    pub(crate) fn into_snapshot(self) -> Result<CheckSnapshot, GitHubError> {
        let checks = self
            .check_runs
            .into_iter()
            .map(CheckRun::into_observed)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CheckSnapshot {
            total_count: self.total_count,
            checks,
        })
    }
}

/// Decode a response body into a snapshot.
pub(crate) fn decode_snapshot(body: &[u8]) -> Result<CheckSnapshot, GitHubError> {
    serde_json::from_slice::<CheckRunsPage>(body)?.into_snapshot()
}
