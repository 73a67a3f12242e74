//! Per-name projection of observed check runs.

use serde::{Deserialize, Serialize};

use super::check::{CheckConclusion, CheckStatus, ObservedCheck};

/// Observed runs ordered like the requested check names.
///
/// Holds at most one run per requested name; names that were never
/// observed contribute no entry, so the result can be shorter than the
/// name list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AlignedResult(Vec<ObservedCheck>);

impl AlignedResult {
    pub fn new(checks: Vec<ObservedCheck>) -> Self {
        Self(checks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ObservedCheck> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservedCheck> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ObservedCheck] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<ObservedCheck> {
        self.0
    }

    pub fn ids(&self) -> Vec<u64> {
        self.0.iter().map(|c| c.id).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn statuses(&self) -> Vec<CheckStatus> {
        self.0.iter().map(|c| c.status).collect()
    }

    pub fn conclusions(&self) -> Vec<Option<CheckConclusion>> {
        self.0.iter().map(|c| c.conclusion).collect()
    }
}

impl<'a> IntoIterator for &'a AlignedResult {
    type Item = &'a ObservedCheck;
    type IntoIter = std::slice::Iter<'a, ObservedCheck>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
