//! checkwait - wait for GitHub check runs to settle
//!
//! Polls the check runs of a Git reference until every named check reaches
//! its expected status (or `completed`), then publishes the aligned runs as
//! step outputs. Exits non-zero on invalid input, timeout, transport errors
//! and conclusion mismatches.
//!
//! Every option also reads the `INPUT_*` variable GitHub Actions exports for
//! the matching action input, so the binary runs unchanged as an action step.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use checkwait_core::{
    init_tracing, CheckWaitError, CheckWaiter, RawInputs, ResultReporter, WaitConfig,
};
use checkwait_github::{
    ActionsContext, ActionsOutput, GitHubChecksClient, GitHubConfig, DEFAULT_API_URL,
};

#[derive(Parser, Debug)]
#[command(name = "checkwait")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wait for GitHub check runs to reach expected states", long_about = None)]
struct Cli {
    /// Check run names, as a JSON array or comma-separated quoted strings
    #[arg(long, env = "INPUT_CHECK_NAMES")]
    check_names: Option<String>,

    /// Expected status per name (queued, in_progress, completed)
    #[arg(long, env = "INPUT_STATUSES")]
    statuses: Option<String>,

    /// Expected conclusion per name, checked once the runs settle
    #[arg(long, env = "INPUT_CONCLUSIONS")]
    conclusions: Option<String>,

    /// Repository owner (default: from GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_OWNER")]
    owner: Option<String>,

    /// Repository name (default: from GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPO")]
    repo: Option<String>,

    /// Commit SHA, branch or tag (default: GITHUB_REF, then GITHUB_SHA)
    #[arg(long = "ref", env = "INPUT_REF")]
    git_ref: Option<String>,

    /// Seconds to wait before giving up (default: 300)
    #[arg(long, env = "INPUT_TIMEOUT")]
    timeout: Option<String>,

    /// Seconds between polls (default: 10)
    #[arg(long, env = "INPUT_POLL_INTERVAL")]
    poll_interval: Option<String>,

    /// API token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            check_names: self.check_names.clone(),
            statuses: self.statuses.clone(),
            conclusions: self.conclusions.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            git_ref: self.git_ref.clone(),
            timeout: self.timeout.clone(),
            poll_interval: self.poll_interval.clone(),
        }
    }

    fn github_config(&self) -> GitHubConfig {
        let token = self
            .github_token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty());

        let mut config = GitHubConfig::new(&self.api_url);
        if let Some(token) = token {
            config = config.with_token(&token);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let mut reporter = ResultReporter::new(ActionsOutput::from_env());

    let config = match WaitConfig::from_raw(&cli.raw_inputs(), &ActionsContext::from_env()) {
        Ok(config) => config,
        Err(err) => return Err(reporter.fail(err).into()),
    };
    let client = match GitHubChecksClient::new(cli.github_config()) {
        Ok(client) => client,
        Err(err) => return Err(reporter.fail(CheckWaitError::from(err)).into()),
    };

    let waiter = CheckWaiter::new(client);
    let aligned = reporter.conclude(&config, waiter.wait(&config).await)?;

    info!(
        reference = %config.target,
        ids = ?aligned.ids(),
        "All checks reached their expected states"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_raw_inputs() {
        let cli = Cli::try_parse_from([
            "checkwait",
            "--check-names",
            r#"["build","lint"]"#,
            "--statuses",
            r#""completed", "queued""#,
            "--ref",
            "refs/heads/main",
            "--timeout",
            "60",
            "--poll-interval",
            "5",
        ])
        .unwrap();

        let raw = cli.raw_inputs();
        assert_eq!(raw.check_names.as_deref(), Some(r#"["build","lint"]"#));
        assert_eq!(raw.statuses.as_deref(), Some(r#""completed", "queued""#));
        assert_eq!(raw.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(raw.timeout.as_deref(), Some("60"));
        assert_eq!(raw.poll_interval.as_deref(), Some("5"));
        assert!(raw.conclusions.is_none());
    }

    #[test]
    fn test_raw_inputs_resolve_to_config() {
        let cli = Cli::try_parse_from([
            "checkwait",
            "--check-names",
            r#"["build"]"#,
            "--owner",
            "octo",
            "--repo",
            "widgets",
            "--ref",
            "abc123",
        ])
        .unwrap();

        let config =
            WaitConfig::from_raw(&cli.raw_inputs(), &ActionsContext::default()).unwrap();
        assert_eq!(config.names, vec!["build".to_string()]);
        assert_eq!(config.target.to_string(), "octo/widgets@abc123");
    }

    #[test]
    fn test_explicit_token_is_used() {
        let cli = Cli::try_parse_from([
            "checkwait",
            "--github-token",
            "t0ken",
            "--api-url",
            "https://ghe.example.com/api/v3",
        ])
        .unwrap();

        let config = cli.github_config();
        assert_eq!(config.token.as_deref(), Some("t0ken"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_verbose_and_json_flags() {
        let cli = Cli::try_parse_from(["checkwait", "-v", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.json);
    }
}
