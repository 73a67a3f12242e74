//! checkwait-github: the GitHub side of checkwait
//!
//! - [`GitHubChecksClient`] lists check runs for a ref over the REST API
//! - [`ActionsContext`] and [`ActionsOutput`] bind to the GitHub Actions
//!   runtime: default target reference, step outputs, failure annotations

pub mod actions;
pub mod client;
pub mod error;
mod wire;

pub use actions::{escape_command_data, format_file_command, ActionsContext, ActionsOutput};
pub use client::{check_runs_url, GitHubChecksClient, GitHubConfig, DEFAULT_API_URL};
pub use error::GitHubError;
