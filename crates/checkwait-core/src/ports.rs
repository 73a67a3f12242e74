//! Collaborator seams for the poll loop and the reporter.
//!
//! - `ChecksSource`: lists the check runs on a reference
//! - `Clock`: time source and the single suspension point between polls
//! - `OutputSink`: where results and failure signals are published
//! - `ContextDefaults`: owner/repo/ref supplied by the hosting environment
//!
//! In-memory implementations live in the `fakes` module.

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::domain::{CheckSnapshot, RefTarget};
use crate::error::Result;

/// Read access to the check runs of a reference.
///
/// Implementations must not retry: any failure is returned as
/// `CheckWaitError::Transport` and ends the invocation.
#[async_trait]
pub trait ChecksSource: Send + Sync {
    async fn list_checks_for_ref(&self, target: &RefTarget) -> Result<CheckSnapshot>;
}

/// Monotonic time plus an awaitable delay.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Destination for named outputs and the failure signal.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    fn set_failed(&mut self, message: &str);
}

/// Defaults for the target reference, taken from the invocation context.
pub trait ContextDefaults {
    fn owner(&self) -> Option<String>;

    fn repo(&self) -> Option<String>;

    fn git_ref(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_sleep_advances_now() {
        let clock = TokioClock;
        let before = clock.now();
        clock.sleep(Duration::from_secs(10)).await;
        assert!(clock.now().duration_since(before) >= Duration::from_secs(10));
    }
}
