//! Core types for cv-pull-request

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recurring merge for one project, as written in the settings file
///
/// `head` and `base` are branch-name templates containing the
/// [`VERSION_PLACEHOLDER`](crate::batch::VERSION_PLACEHOLDER) token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDefinition {
    /// Display name, also the key of the project's outcome
    pub name: String,
    /// Repository name under the owner
    pub repo: String,
    /// Head (source) branch template
    #[serde(rename = "head")]
    pub head_template: String,
    /// Base (target) branch template
    #[serde(rename = "base")]
    pub base_template: String,
    /// Per-project owner override; the global owner is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ProjectDefinition {
    /// Create a project that uses the global owner
    pub fn new(
        name: impl Into<String>,
        repo: impl Into<String>,
        head_template: impl Into<String>,
        base_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            repo: repo.into(),
            head_template: head_template.into(),
            base_template: base_template.into(),
            owner: None,
        }
    }
}

/// What to do when a pull request was created but assigning people to it failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AssigneeFailurePolicy {
    /// Still report the project as created
    #[default]
    Ignore,
    /// Report the project as failed
    Fail,
}

/// Source of the API token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token`
    CommandLine,
    /// Settings file
    SettingsFile,
    /// `GITHUB_TOKEN` / `GH_TOKEN`
    EnvVar,
    /// Typed in at the prompt
    Prompt,
}

impl TokenSource {
    /// Whether the token may be written back to the settings file
    pub const fn is_persisted(self) -> bool {
        !matches!(self, Self::EnvVar)
    }
}

/// Cross-project values for one run
///
/// Built once by the config layer and passed by reference to the planner and
/// executor. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSettings {
    /// Default repository owner (user or organization)
    pub owner: String,
    /// Release version substituted into branch templates
    pub version: String,
    /// Run date, `MM-dd-yyyy`
    pub date: String,
    /// People assigned to every created pull request
    pub assignees: Vec<String>,
    /// API token
    pub token: String,
    /// Where the token came from
    pub token_source: TokenSource,
    /// `User-Agent` sent with API requests
    pub user_agent: String,
    /// IANA timezone sent with API requests
    pub timezone: String,
    /// Skip every interactive prompt
    pub automatic: bool,
    /// Verbose API logging
    pub debug: bool,
    /// How assignee attachment failures are reported
    pub on_assign_failure: AssigneeFailurePolicy,
}

/// A project merged with the global settings, branch names fully resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Project name
    pub name: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Resolved head branch
    pub head: String,
    /// Resolved base branch
    pub base: String,
    /// Release version
    pub version: String,
    /// Run date, `MM-dd-yyyy`
    pub date: String,
    /// People to assign once the pull request exists
    pub assignees: Vec<String>,
}

impl ResolvedRequest {
    /// `owner/repo`
    pub fn full_repo(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Parameters of a create-pull-request call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request title
    pub title: String,
    /// Head branch
    pub head: String,
    /// Base branch
    pub base: String,
    /// Markdown body
    pub body: String,
}

/// A pull request returned by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Pull request number (issue number for assignee calls)
    pub number: u64,
    /// Web URL for the pull request
    pub html_url: String,
}

/// Terminal result of one project's attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pull request created
    Success {
        /// Link to the created pull request
        reference_url: String,
    },
    /// Pull request not created (or, under [`AssigneeFailurePolicy::Fail`], not fully set up)
    Failure {
        /// Most specific error detail available
        message: String,
    },
}

impl Outcome {
    /// Whether the project succeeded
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One line of the final report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Project name
    pub project_name: String,
    /// The project's outcome
    pub outcome: Outcome,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success { reference_url } => {
                write!(f, "✓ {}: {reference_url}", self.project_name)
            }
            Outcome::Failure { message } => write!(f, "✗ {}: {message}", self.project_name),
        }
    }
}
