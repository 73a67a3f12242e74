//! Publishing of the final result or failure.
//!
//! Outputs on success (all JSON, index-aligned with the check names):
//! - `result`: array of `{id, name, status, conclusion}` records
//! - `ids`, `names`, `statuses`, `conclusions`: the parallel arrays
//!
//! A conclusion mismatch still publishes every output before the failure
//! signal. Every other failure publishes nothing but the failure signal.

use crate::config::WaitConfig;
use crate::domain::AlignedResult;
use crate::error::{CheckWaitError, Result};
use crate::gate::CompletionGate;
use crate::obs;
use crate::ports::OutputSink;

pub const OUTPUT_RESULT: &str = "result";
pub const OUTPUT_IDS: &str = "ids";
pub const OUTPUT_NAMES: &str = "names";
pub const OUTPUT_STATUSES: &str = "statuses";
pub const OUTPUT_CONCLUSIONS: &str = "conclusions";

pub struct ResultReporter<O> {
    sink: O,
}

impl<O: OutputSink> ResultReporter<O> {
    pub fn new(sink: O) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn into_inner(self) -> O {
        self.sink
    }

    /// Publish the outcome of a wait and apply the conclusion check.
    pub fn conclude(
        &mut self,
        config: &WaitConfig,
        outcome: Result<AlignedResult>,
    ) -> Result<AlignedResult> {
        let aligned = outcome.map_err(|err| self.fail(err))?;
        self.publish(&aligned).map_err(|err| self.fail(err))?;

        let verdict = CompletionGate::check_conclusions(
            &config.names,
            &aligned,
            &config.expectations.conclusions,
        );
        if !verdict.passed {
            verdict.mismatches.iter().for_each(obs::emit_conclusion_mismatch);
            return Err(self.fail(CheckWaitError::ConclusionMismatch {
                mismatches: verdict.mismatches,
            }));
        }

        Ok(aligned)
    }

    /// Set the result outputs.
    pub fn publish(&mut self, aligned: &AlignedResult) -> Result<()> {
        self.set_json(OUTPUT_RESULT, aligned)?;
        self.set_json(OUTPUT_IDS, &aligned.ids())?;
        self.set_json(OUTPUT_NAMES, &aligned.names())?;
        self.set_json(OUTPUT_STATUSES, &aligned.statuses())?;
        self.set_json(OUTPUT_CONCLUSIONS, &aligned.conclusions())
    }

    /// Signal failure and hand the error back to the caller.
    pub fn fail(&mut self, err: CheckWaitError) -> CheckWaitError {
        self.sink.set_failed(&err.to_string());
        err
    }

    fn set_json<T: serde::Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| CheckWaitError::Output(std::io::Error::other(e)))?;
        self.sink.set_output(name, &encoded)
    }
}
