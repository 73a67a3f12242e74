//! Structured events for the wait lifecycle.
//!
//! Every poll emits `wait.snapshot` or `wait.snapshot_incomplete`, followed
//! by either `wait.settled` or `wait.sleeping`; an expired deadline emits
//! `wait.timed_out`.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::{AlignedResult, RefTarget};
use crate::gate::ConclusionMismatch;

pub fn emit_wait_started(
    target: &RefTarget,
    names: &[String],
    timeout: Duration,
    poll_interval: Duration,
) {
    info!(
        event = "wait.started",
        reference = %target,
        checks = ?names,
        timeout_secs = timeout.as_secs(),
        poll_interval_secs = poll_interval.as_secs(),
    );
}

/// Emit the name/status pairs retrieved by one poll.
pub fn emit_snapshot(attempt: u32, total_count: u64, aligned: &AlignedResult) {
    let retrieved: Vec<String> = aligned
        .iter()
        .map(|check| format!("{}={}", check.name, check.status))
        .collect();
    info!(
        event = "wait.snapshot",
        attempt = attempt,
        total_count = total_count,
        retrieved = ?retrieved,
    );
}

pub fn emit_snapshot_incomplete(attempt: u32, total_count: u64, requested: usize) {
    debug!(
        event = "wait.snapshot_incomplete",
        attempt = attempt,
        total_count = total_count,
        requested = requested,
    );
}

pub fn emit_settled(attempt: u32, elapsed: Duration, checks: usize) {
    info!(
        event = "wait.settled",
        attempt = attempt,
        elapsed_secs = elapsed.as_secs(),
        checks = checks,
        "All check runs reached the expected statuses"
    );
}

/// `remaining` is `None` when the wait has no representable deadline.
pub fn emit_sleeping(remaining: Option<Duration>, poll_interval: Duration) {
    info!(
        event = "wait.sleeping",
        remaining_secs = remaining.map(|r| r.as_secs()),
        poll_interval_secs = poll_interval.as_secs(),
    );
}

pub fn emit_timed_out(attempts: u32, timeout: Duration) {
    warn!(
        event = "wait.timed_out",
        attempts = attempts,
        timeout_secs = timeout.as_secs(),
    );
}

pub fn emit_conclusion_mismatch(mismatch: &ConclusionMismatch) {
    warn!(
        event = "report.conclusion_mismatch",
        check = %mismatch.name,
        expected = %mismatch.expected,
        observed = ?mismatch.observed,
    );
}
