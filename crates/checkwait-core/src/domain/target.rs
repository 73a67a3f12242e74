//! The repository reference whose check runs are polled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a commit, branch or tag in a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefTarget {
    pub owner: String,
    pub repo: String,

    /// Commit SHA, branch or tag name, or a full `refs/...` path.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl RefTarget {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.git_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serde_field_name() {
        let target = RefTarget::new("octo", "widgets", "refs/heads/main");
        assert_eq!(target.to_string(), "octo/widgets@refs/heads/main");

        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["ref"], "refs/heads/main");
    }
}
