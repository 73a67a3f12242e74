//! GitHub Actions runtime integration
//!
//! - `ActionsContext`: owner/repo/ref defaults from the workflow environment
//! - `ActionsOutput`: step outputs via `$GITHUB_OUTPUT` and `::error::`
//!   workflow commands for the failure signal

use checkwait_core::{ContextDefaults, OutputSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Defaults taken from the variables a workflow run exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsContext {
    owner: Option<String>,
    repo: Option<String>,
    git_ref: Option<String>,
}

impl ActionsContext {
    /// Read `GITHUB_REPOSITORY`, `GITHUB_REF` and `GITHUB_SHA` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// `GITHUB_REPOSITORY` is split at the first `/` into owner and repo;
    /// the ref is `GITHUB_REF`, or `GITHUB_SHA` when that is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (owner, repo) = match non_empty("GITHUB_REPOSITORY") {
            Some(slug) => match slug.split_once('/') {
                Some((owner, repo)) => (Some(owner.to_string()), Some(repo.to_string())),
                None => (Some(slug), None),
            },
            None => (None, None),
        };
        let git_ref = non_empty("GITHUB_REF").or_else(|| non_empty("GITHUB_SHA"));

        ActionsContext {
            owner: owner.filter(|v| !v.is_empty()),
            repo: repo.filter(|v| !v.is_empty()),
            git_ref,
        }
    }
}

impl ContextDefaults for ActionsContext {
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

/// Output sink for a workflow step.
///
/// With an output file, each output is appended as a heredoc record
/// (`name<<DELIM`, value, `DELIM`). Without one, outputs are printed to
/// stdout as `name=value` lines.
#[derive(Debug, Clone, Default)]
pub struct ActionsOutput {
    output_file: Option<PathBuf>,
}

impl ActionsOutput {
    /// Use `GITHUB_OUTPUT` when it is set.
    pub fn from_env() -> Self {
        ActionsOutput {
            output_file: std::env::var_os("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        ActionsOutput {
            output_file: Some(path.into()),
        }
    }

    pub fn stdout() -> Self {
        Self::default()
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}

impl OutputSink for ActionsOutput {
    fn set_output(&mut self, name: &str, value: &str) -> checkwait_core::Result<()> {
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(format_file_command(name, value).as_bytes())?;
                debug!(output = %name, file = %path.display(), "Output written");
                Ok(())
            }
            None => {
                println!("{name}={value}");
                Ok(())
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        println!("::error::{}", escape_command_data(message));
    }
}

/// Heredoc record for the output file, with a delimiter that cannot occur in `value`.
pub fn format_file_command(name: &str, value: &str) -> String {
    let mut delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    while value.contains(&delimiter) {
        delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Escape data for a workflow command line.
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_context_splits_repository_slug() {
        let ctx = ActionsContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_REF", "refs/pull/7/merge"),
            ("GITHUB_SHA", "0123abcd"),
        ]));
        assert_eq!(ctx.owner(), Some("octo".to_string()));
        assert_eq!(ctx.repo(), Some("widgets".to_string()));
        assert_eq!(ctx.git_ref(), Some("refs/pull/7/merge".to_string()));
    }

    #[test]
    fn test_context_falls_back_to_sha() {
        let ctx = ActionsContext::from_lookup(lookup(&[
            ("GITHUB_REF", ""),
            ("GITHUB_SHA", "0123abcd"),
        ]));
        assert_eq!(ctx.git_ref(), Some("0123abcd".to_string()));
        assert_eq!(ctx.owner(), None);
    }

    #[test]
    fn test_context_without_slash_has_no_repo() {
        let ctx = ActionsContext::from_lookup(lookup(&[("GITHUB_REPOSITORY", "octo")]));
        assert_eq!(ctx.owner(), Some("octo".to_string()));
        assert_eq!(ctx.repo(), None);
    }

    #[test]
    fn test_file_command_round_trips_value() {
        let record = format_file_command("names", r#"["a","b"]"#);
        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines.len(), 3);
        let delimiter = lines[0].strip_prefix("names<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(lines[1], r#"["a","b"]"#);
        assert_eq!(lines[2], delimiter);
    }

    #[test]
    fn test_escape_command_data() {
        assert_eq!(
            escape_command_data("50% done\nnext\r"),
            "50%25 done%0Anext%0D"
        );
    }
}
