//! Validated configuration for one check-wait invocation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{CheckConclusion, CheckStatus, RefTarget};
use crate::error::{CheckWaitError, Result};
use crate::normalize::{parse_conclusions, parse_statuses, parse_string_list};
use crate::ports::ContextDefaults;

/// Total wait budget when none is given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Delay between polls when none is given.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Caller options exactly as supplied, before any parsing.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub check_names: Option<String>,
    pub statuses: Option<String>,
    pub conclusions: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub git_ref: Option<String>,
    pub timeout: Option<String>,
    pub poll_interval: Option<String>,
}

/// Expected state per check name, index-aligned with the names.
///
/// An empty list places no constraint on that axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expectations {
    pub statuses: Vec<CheckStatus>,
    pub conclusions: Vec<CheckConclusion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Requested check names; their order is the order of every output.
    pub names: Vec<String>,
    pub expectations: Expectations,
    pub target: RefTarget,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Build a config with default timing.
    pub fn new(names: Vec<String>, expectations: Expectations, target: RefTarget) -> Result<Self> {
        validate_lists(&names, &expectations)?;
        Ok(Self {
            names,
            expectations,
            target,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Normalize and validate raw caller options.
    ///
    /// Empty `owner`, `repo` and `ref` fall back to `defaults`.
    pub fn from_raw(raw: &RawInputs, defaults: &dyn ContextDefaults) -> Result<Self> {
        let names = parse_string_list("check_names", raw.check_names.as_deref())?;
        let expectations = Expectations {
            statuses: parse_statuses(raw.statuses.as_deref())?,
            conclusions: parse_conclusions(raw.conclusions.as_deref())?,
        };
        validate_lists(&names, &expectations)?;

        let target = RefTarget {
            owner: resolve_target_field("owner", raw.owner.as_deref(), || defaults.owner())?,
            repo: resolve_target_field("repo", raw.repo.as_deref(), || defaults.repo())?,
            git_ref: resolve_target_field("ref", raw.git_ref.as_deref(), || defaults.git_ref())?,
        };

        let timeout = parse_seconds("timeout", raw.timeout.as_deref(), DEFAULT_TIMEOUT_SECS)?;
        let poll_interval = parse_seconds(
            "poll_interval",
            raw.poll_interval.as_deref(),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        if poll_interval == 0 {
            return Err(CheckWaitError::invalid_input(
                "poll_interval",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            names,
            expectations,
            target,
            timeout: Duration::from_secs(timeout),
            poll_interval: Duration::from_secs(poll_interval),
        })
    }
}

fn validate_lists(names: &[String], expectations: &Expectations) -> Result<()> {
    if names.is_empty() {
        return Err(CheckWaitError::invalid_input(
            "check_names",
            "must be a non-empty array of strings",
        ));
    }
    if !expectations.statuses.is_empty() && expectations.statuses.len() != names.len() {
        return Err(CheckWaitError::invalid_input(
            "statuses",
            format!(
                "{} statuses given for {} check names",
                expectations.statuses.len(),
                names.len()
            ),
        ));
    }
    if !expectations.conclusions.is_empty() && expectations.conclusions.len() != names.len() {
        return Err(CheckWaitError::invalid_input(
            "conclusions",
            format!(
                "{} conclusions given for {} check names",
                expectations.conclusions.len(),
                names.len()
            ),
        ));
    }
    Ok(())
}

fn resolve_target_field(
    field: &'static str,
    value: Option<&str>,
    fallback: impl FnOnce() -> Option<String>,
) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(fallback)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            CheckWaitError::invalid_input(field, "not given and not available from the context")
        })
}

fn parse_seconds(field: &'static str, raw: Option<&str>, default: u64) -> Result<u64> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse::<u64>().map_err(|_| {
            CheckWaitError::invalid_input(
                field,
                format!("'{value}' is not a whole number of seconds"),
            )
        }),
    }
}
