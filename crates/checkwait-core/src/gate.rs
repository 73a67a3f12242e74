//! Completion and conclusion evaluation for aligned check runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{AlignedResult, CheckConclusion, CheckStatus};

/// One check whose conclusion differs from the expected one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConclusionMismatch {
    /// Requested check name at the mismatching index.
    pub name: String,

    pub expected: CheckConclusion,

    /// `None` when the run has no conclusion or no run was aligned at that index.
    pub observed: Option<CheckConclusion>,
}

impl fmt::Display for ConclusionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.observed {
            Some(observed) => write!(
                f,
                "{}: expected {}, got {}",
                self.name, self.expected, observed
            ),
            None => write!(f, "{}: expected {}, got none", self.name, self.expected),
        }
    }
}

/// Conclusion check verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConclusionVerdict {
    pub passed: bool,

    /// Mismatches in name order (empty if passed).
    pub mismatches: Vec<ConclusionMismatch>,

    pub message: String,
}

/// Completion rules for a wait.
pub struct CompletionGate;

impl CompletionGate {
    /// Whether the aligned runs have reached the expected statuses.
    ///
    /// With expected statuses, the aligned result must have exactly one run
    /// per expectation and every status must match at its index. Without
    /// them, every aligned run must be `completed`; this holds vacuously for
    /// an empty result, so callers only evaluate snapshots whose total count
    /// covers the requested names.
    pub fn statuses_satisfied(aligned: &AlignedResult, expected: &[CheckStatus]) -> bool {
        if expected.is_empty() {
            aligned
                .iter()
                .all(|check| check.status == CheckStatus::Completed)
        } else {
            aligned.len() == expected.len()
                && aligned
                    .iter()
                    .zip(expected)
                    .all(|(check, status)| check.status == *status)
        }
    }

    /// Compare observed conclusions with the expected ones, index by index.
    ///
    /// An empty expectation list always passes.
    pub fn check_conclusions(
        names: &[String],
        aligned: &AlignedResult,
        expected: &[CheckConclusion],
    ) -> ConclusionVerdict {
        let mismatches: Vec<ConclusionMismatch> = expected
            .iter()
            .enumerate()
            .filter_map(|(idx, &want)| {
                let observed = aligned.get(idx).and_then(|check| check.conclusion);
                (observed != Some(want)).then(|| ConclusionMismatch {
                    name: names.get(idx).cloned().unwrap_or_default(),
                    expected: want,
                    observed,
                })
            })
            .collect();

        let passed = mismatches.is_empty();
        let message = if passed {
            "All conclusions match".to_string()
        } else {
            format!("{} check(s) concluded unexpectedly", mismatches.len())
        };

        ConclusionVerdict {
            passed,
            mismatches,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObservedCheck;

    fn aligned(runs: &[(&str, CheckStatus, Option<CheckConclusion>)]) -> AlignedResult {
        AlignedResult::new(
            runs.iter()
                .enumerate()
                .map(|(idx, (name, status, conclusion))| {
                    ObservedCheck::new(idx as u64 + 1, *name, *status, *conclusion)
                })
                .collect(),
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_completed_without_expectations() {
        let result = aligned(&[
            ("a", CheckStatus::Completed, Some(CheckConclusion::Success)),
            ("b", CheckStatus::Completed, Some(CheckConclusion::Failure)),
        ]);
        assert!(CompletionGate::statuses_satisfied(&result, &[]));
    }

    #[test]
    fn test_one_in_progress_without_expectations() {
        let result = aligned(&[
            ("a", CheckStatus::InProgress, None),
            ("b", CheckStatus::Completed, Some(CheckConclusion::Success)),
        ]);
        assert!(!CompletionGate::statuses_satisfied(&result, &[]));
    }

    #[test]
    fn test_empty_result_is_vacuously_satisfied() {
        assert!(CompletionGate::statuses_satisfied(
            &AlignedResult::default(),
            &[]
        ));
    }

    #[test]
    fn test_expected_statuses_must_match_by_index() {
        let result = aligned(&[
            ("a", CheckStatus::Queued, None),
            ("b", CheckStatus::Completed, Some(CheckConclusion::Success)),
        ]);
        assert!(CompletionGate::statuses_satisfied(
            &result,
            &[CheckStatus::Queued, CheckStatus::Completed]
        ));
        assert!(!CompletionGate::statuses_satisfied(
            &result,
            &[CheckStatus::Completed, CheckStatus::Queued]
        ));
    }

    #[test]
    fn test_expected_statuses_require_full_alignment() {
        let result = aligned(&[("a", CheckStatus::Completed, None)]);
        assert!(!CompletionGate::statuses_satisfied(
            &result,
            &[CheckStatus::Completed, CheckStatus::Completed]
        ));
    }

    #[test]
    fn test_conclusions_pass_without_expectations() {
        let result = aligned(&[("a", CheckStatus::Completed, Some(CheckConclusion::Failure))]);
        let verdict = CompletionGate::check_conclusions(&names(&["a"]), &result, &[]);
        assert!(verdict.passed);
        assert!(verdict.mismatches.is_empty());
    }

    #[test]
    fn test_conclusion_mismatch_reported_per_check() {
        let result = aligned(&[
            ("a", CheckStatus::Completed, Some(CheckConclusion::Success)),
            ("b", CheckStatus::Completed, Some(CheckConclusion::Cancelled)),
        ]);
        let verdict = CompletionGate::check_conclusions(
            &names(&["a", "b"]),
            &result,
            &[CheckConclusion::Success, CheckConclusion::Success],
        );
        assert!(!verdict.passed);
        assert_eq!(
            verdict.mismatches,
            vec![ConclusionMismatch {
                name: "b".to_string(),
                expected: CheckConclusion::Success,
                observed: Some(CheckConclusion::Cancelled),
            }]
        );
        assert!(verdict.message.contains("1 check(s)"));
    }

    #[test]
    fn test_missing_aligned_entry_is_a_mismatch() {
        let result = aligned(&[("a", CheckStatus::Completed, Some(CheckConclusion::Success))]);
        let verdict = CompletionGate::check_conclusions(
            &names(&["a", "b"]),
            &result,
            &[CheckConclusion::Success, CheckConclusion::Success],
        );
        assert!(!verdict.passed);
        assert_eq!(verdict.mismatches[0].name, "b");
        assert_eq!(verdict.mismatches[0].observed, None);
    }
}
