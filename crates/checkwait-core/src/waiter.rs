//! The poll loop: fetch, align, evaluate, sleep, until settled or expired.

use tracing::Instrument;

use crate::config::WaitConfig;
use crate::domain::AlignedResult;
use crate::error::{CheckWaitError, Result};
use crate::gate::CompletionGate;
use crate::matcher::align;
use crate::obs;
use crate::ports::{ChecksSource, Clock, TokioClock};

/// Polls a [`ChecksSource`] until the requested checks settle.
pub struct CheckWaiter<S, C = TokioClock> {
    source: S,
    clock: C,
}

impl<S: ChecksSource> CheckWaiter<S, TokioClock> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: TokioClock,
        }
    }
}

impl<S: ChecksSource, C: Clock> CheckWaiter<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wait until the aligned statuses satisfy `config`, or the deadline passes.
    ///
    /// Polls while `now <= deadline`, so a poll at exactly the deadline still
    /// counts. A snapshot whose total count is below the number of requested
    /// names is not evaluated. Listing errors abort the wait immediately.
    pub async fn wait(&self, config: &WaitConfig) -> Result<AlignedResult> {
        let span = tracing::info_span!("checkwait.wait", reference = %config.target);
        self.poll_until_settled(config).instrument(span).await
    }

    async fn poll_until_settled(&self, config: &WaitConfig) -> Result<AlignedResult> {
        obs::emit_wait_started(
            &config.target,
            &config.names,
            config.timeout,
            config.poll_interval,
        );

        let started = self.clock.now();
        // A timeout too large to represent as an instant never expires.
        let deadline = started.checked_add(config.timeout);
        let mut now = started;
        let mut attempt: u32 = 0;

        while deadline.map_or(true, |deadline| now <= deadline) {
            attempt += 1;
            let snapshot = self.source.list_checks_for_ref(&config.target).await?;

            if snapshot.total_count >= config.names.len() as u64 {
                let aligned = align(&config.names, &snapshot.checks);
                obs::emit_snapshot(attempt, snapshot.total_count, &aligned);

                if CompletionGate::statuses_satisfied(&aligned, &config.expectations.statuses) {
                    obs::emit_settled(attempt, now.duration_since(started), aligned.len());
                    return Ok(aligned);
                }
            } else {
                obs::emit_snapshot_incomplete(attempt, snapshot.total_count, config.names.len());
            }

            obs::emit_sleeping(
                deadline.map(|deadline| deadline.saturating_duration_since(now)),
                config.poll_interval,
            );
            self.clock.sleep(config.poll_interval).await;
            now = self.clock.now();
        }

        obs::emit_timed_out(attempt, config.timeout);
        Err(CheckWaitError::Timeout {
            timeout_secs: config.timeout.as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Expectations;
    use crate::domain::{CheckConclusion, CheckSnapshot, CheckStatus, ObservedCheck, RefTarget};
    use crate::fakes::{ManualClock, ScriptedSource};
    use std::time::Duration;

    fn config(names: &[&str], statuses: Vec<CheckStatus>) -> WaitConfig {
        WaitConfig::new(
            names.iter().map(|s| s.to_string()).collect(),
            Expectations {
                statuses,
                conclusions: vec![],
            },
            RefTarget::new("octo", "widgets", "main"),
        )
        .unwrap()
        .with_timeout(Duration::from_secs(30))
        .with_poll_interval(Duration::from_secs(10))
    }

    fn done(id: u64, name: &str) -> ObservedCheck {
        ObservedCheck::new(
            id,
            name,
            CheckStatus::Completed,
            Some(CheckConclusion::Success),
        )
    }

    #[tokio::test]
    async fn test_short_snapshot_is_not_evaluated() {
        // One completed run for two names would satisfy "all completed"
        // vacuously for the missing name; the count guard keeps polling.
        let source = ScriptedSource::new(vec![
            CheckSnapshot::from_checks(vec![done(1, "a")]),
            CheckSnapshot::from_checks(vec![done(1, "a"), done(2, "b")]),
        ]);
        let waiter = CheckWaiter::with_clock(source, ManualClock::new());

        let aligned = waiter.wait(&config(&["a", "b"], vec![])).await.unwrap();

        assert_eq!(aligned.ids(), vec![1, 2]);
        assert_eq!(waiter.source().calls(), 2);
        assert_eq!(waiter.clock().elapsed(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_duplicates_can_pass_count_guard_without_covering_names() {
        let source = ScriptedSource::new(vec![CheckSnapshot::from_checks(vec![
            done(1, "a"),
            done(2, "a"),
        ])]);
        let waiter = CheckWaiter::with_clock(source, ManualClock::new());

        let aligned = waiter.wait(&config(&["a", "b"], vec![])).await.unwrap();

        assert_eq!(aligned.ids(), vec![1]);
        assert_eq!(waiter.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let waiter = CheckWaiter::with_clock(
            ScriptedSource::failing("connection reset"),
            ManualClock::new(),
        );

        let err = waiter.wait(&config(&["a"], vec![])).await.unwrap_err();

        assert!(matches!(err, CheckWaitError::Transport(ref msg) if msg.contains("connection reset")));
        assert_eq!(waiter.source().calls(), 1);
        assert_eq!(waiter.clock().elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_timeout_polls_once() {
        let source = ScriptedSource::new(vec![CheckSnapshot::from_checks(vec![
            ObservedCheck::new(1, "a", CheckStatus::Queued, None),
        ])]);
        let waiter = CheckWaiter::with_clock(source, ManualClock::new());
        let cfg = config(&["a"], vec![]).with_timeout(Duration::ZERO);

        let err = waiter.wait(&cfg).await.unwrap_err();

        assert!(matches!(err, CheckWaitError::Timeout { timeout_secs: 0 }));
        assert_eq!(waiter.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_never_expires() {
        let source = ScriptedSource::new(vec![
            CheckSnapshot::from_checks(vec![ObservedCheck::new(
                1,
                "a",
                CheckStatus::Queued,
                None,
            )]),
            CheckSnapshot::from_checks(vec![done(1, "a")]),
        ]);
        let waiter = CheckWaiter::with_clock(source, ManualClock::new());
        let cfg = config(&["a"], vec![]).with_timeout(Duration::from_secs(u64::MAX));

        let aligned = waiter.wait(&cfg).await.unwrap();

        assert_eq!(aligned.ids(), vec![1]);
        assert_eq!(waiter.source().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_settles_after_one_interval() {
        let source = ScriptedSource::new(vec![
            CheckSnapshot::from_checks(vec![ObservedCheck::new(
                1,
                "a",
                CheckStatus::InProgress,
                None,
            )]),
            CheckSnapshot::from_checks(vec![done(1, "a")]),
        ]);
        let waiter = CheckWaiter::new(source);

        let aligned = waiter.wait(&config(&["a"], vec![])).await.unwrap();

        assert_eq!(aligned.len(), 1);
        assert_eq!(waiter.source().calls(), 2);
    }
}
