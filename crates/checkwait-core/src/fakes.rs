//! In-memory collaborators (testing only)
//!
//! Provides `ScriptedSource`, `ManualClock`, `MemoryOutput` and
//! `StaticContext`, which satisfy the port contracts without network access
//! or real time passing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::{CheckSnapshot, RefTarget};
use crate::error::{CheckWaitError, Result};
use crate::ports::{ChecksSource, Clock, ContextDefaults, OutputSink};

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

/// Check source that replays a fixed sequence of snapshots.
///
/// Once the script runs out, the last snapshot is repeated.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<CheckSnapshot>>,
    last: Mutex<CheckSnapshot>,
    failure: Option<String>,
    calls: AtomicUsize,
    targets: Mutex<Vec<RefTarget>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<CheckSnapshot>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// A source whose every call fails with a transport error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Number of listing calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Targets passed to each call, in call order.
    pub fn targets(&self) -> Vec<RefTarget> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChecksSource for ScriptedSource {
    async fn list_checks_for_ref(&self, target: &RefTarget) -> Result<CheckSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets.lock().unwrap().push(target.clone());

        if let Some(message) = &self.failure {
            return Err(CheckWaitError::Transport(message.clone()));
        }

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// Clock whose time only moves when `sleep` is awaited.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Total simulated time slept.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    /// Every sleep requested, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}

// ---------------------------------------------------------------------------
// MemoryOutput
// ---------------------------------------------------------------------------

/// Output sink that records outputs and failure messages.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    pub outputs: Vec<(String, String)>,
    pub failures: Vec<String>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value set for `name`.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl OutputSink for MemoryOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// StaticContext
// ---------------------------------------------------------------------------

/// Fixed owner/repo/ref defaults.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub git_ref: Option<String>,
}

impl StaticContext {
    pub fn new(owner: &str, repo: &str, git_ref: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
            git_ref: Some(git_ref.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ContextDefaults for StaticContext {
    fn owner(&self) -> Option<String> {
        self.owner.clone()
    }

    fn repo(&self) -> Option<String> {
        self.repo.clone()
    }

    fn git_ref(&self) -> Option<String> {
        self.git_ref.clone()
    }
}
