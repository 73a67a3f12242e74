//! Check-run records and their lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A state string that is not a member of the closed status/conclusion sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check {kind} '{value}' (expected one of: {allowed})")]
pub struct UnknownStateError {
    pub kind: &'static str,
    pub value: String,
    pub allowed: String,
}

/// Lifecycle status of a check run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 3] = [
        CheckStatus::Queued,
        CheckStatus::InProgress,
        CheckStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Queued => "queued",
            CheckStatus::InProgress => "in_progress",
            CheckStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStateError {
                kind: "status",
                value: s.to_string(),
                allowed: join_names(CheckStatus::ALL.iter().map(|s| s.as_str())),
            })
    }
}

/// Final outcome of a completed check run.
///
/// Callers may only expect the six members in [`CheckConclusion::EXPECTABLE`];
/// `skipped`, `stale` and `startup_failure` are also reported by the service
/// and are accepted so that observed runs never fail to decode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
    ActionRequired,
    Skipped,
    Stale,
    StartupFailure,
}

impl CheckConclusion {
    pub const ALL: [CheckConclusion; 9] = [
        CheckConclusion::Success,
        CheckConclusion::Failure,
        CheckConclusion::Neutral,
        CheckConclusion::Cancelled,
        CheckConclusion::TimedOut,
        CheckConclusion::ActionRequired,
        CheckConclusion::Skipped,
        CheckConclusion::Stale,
        CheckConclusion::StartupFailure,
    ];

    /// Conclusions a caller may require of a check.
    pub const EXPECTABLE: [CheckConclusion; 6] = [
        CheckConclusion::Success,
        CheckConclusion::Failure,
        CheckConclusion::Neutral,
        CheckConclusion::Cancelled,
        CheckConclusion::TimedOut,
        CheckConclusion::ActionRequired,
    ];

    pub fn is_expectable(&self) -> bool {
        CheckConclusion::EXPECTABLE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckConclusion::Success => "success",
            CheckConclusion::Failure => "failure",
            CheckConclusion::Neutral => "neutral",
            CheckConclusion::Cancelled => "cancelled",
            CheckConclusion::TimedOut => "timed_out",
            CheckConclusion::ActionRequired => "action_required",
            CheckConclusion::Skipped => "skipped",
            CheckConclusion::Stale => "stale",
            CheckConclusion::StartupFailure => "startup_failure",
        }
    }
}

impl fmt::Display for CheckConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckConclusion {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckConclusion::ALL
            .into_iter()
            .find(|conclusion| conclusion.as_str() == s)
            .ok_or_else(|| UnknownStateError {
                kind: "conclusion",
                value: s.to_string(),
                allowed: join_names(CheckConclusion::ALL.iter().map(|c| c.as_str())),
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// A check run as reported for a reference at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservedCheck {
    /// Identifier assigned by the CI service.
    pub id: u64,

    /// Check name; several runs may share one name after re-runs.
    pub name: String,

    pub status: CheckStatus,

    /// Absent until the run completes.
    pub conclusion: Option<CheckConclusion>,
}

impl ObservedCheck {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        status: CheckStatus,
        conclusion: Option<CheckConclusion>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            conclusion,
        }
    }
}

/// One listing of the check runs on a reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckSnapshot {
    /// Total number of runs the service reports for the reference.
    pub total_count: u64,

    /// Runs in the order the service returned them.
    pub checks: Vec<ObservedCheck>,
}

impl CheckSnapshot {
    /// Snapshot whose total count equals the number of listed runs.
    pub fn from_checks(checks: Vec<ObservedCheck>) -> Self {
        Self {
            total_count: checks.len() as u64,
            checks,
        }
    }
}
