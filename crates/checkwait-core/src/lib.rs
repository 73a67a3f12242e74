//! checkwait core library
//!
//! Waits for a named set of CI check runs on a reference to reach expected
//! states:
//! - `normalize` / `config`: caller options into a validated [`WaitConfig`]
//! - `matcher`: observed runs aligned to the requested name order
//! - `gate`: status completion and conclusion checks
//! - `waiter`: the poll loop bounded by a deadline
//! - `reporter`: outputs and the failure signal

pub mod config;
pub mod domain;
pub mod error;
pub mod fakes;
pub mod gate;
pub mod matcher;
pub mod normalize;
pub mod obs;
pub mod ports;
pub mod reporter;
pub mod telemetry;
pub mod waiter;

pub use config::{
    Expectations, RawInputs, WaitConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use domain::{
    AlignedResult, CheckConclusion, CheckSnapshot, CheckStatus, ObservedCheck, RefTarget,
    UnknownStateError,
};
pub use error::{CheckWaitError, Result};
pub use gate::{CompletionGate, ConclusionMismatch, ConclusionVerdict};
pub use matcher::align;
pub use ports::{ChecksSource, Clock, ContextDefaults, OutputSink, TokioClock};
pub use reporter::ResultReporter;
pub use telemetry::init_tracing;
pub use waiter::CheckWaiter;
