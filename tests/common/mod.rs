//! Shared fixtures for integration and unit tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{AddAssigneesCall, MockPlatformService};

use cv_pull_request::types::{
    AssigneeFailurePolicy, GlobalSettings, ProjectDefinition, TokenSource,
};

/// Settings for an automatic run of version 3.2
pub fn settings() -> GlobalSettings {
    GlobalSettings {
        owner: "acme".to_string(),
        version: "3.2".to_string(),
        date: "10-17-2026".to_string(),
        assignees: vec!["alice".to_string(), "bob".to_string()],
        token: "t0ken".to_string(),
        token_source: TokenSource::CommandLine,
        user_agent: "cv-pull-request tests".to_string(),
        timezone: "UTC".to_string(),
        automatic: true,
        debug: false,
        on_assign_failure: AssigneeFailurePolicy::Ignore,
    }
}

/// Projects named after their repositories, all `dev_{version}` -> `test_{version}`
pub fn make_projects(names: &[&str]) -> Vec<ProjectDefinition> {
    names
        .iter()
        .map(|name| ProjectDefinition::new(*name, *name, "dev_{version}", "test_{version}"))
        .collect()
}

/// The two-project fixture: A (dev -> test) and B (rel -> stage)
pub fn two_projects() -> Vec<ProjectDefinition> {
    vec![
        ProjectDefinition::new("A", "repo-a", "dev_{version}", "test_{version}"),
        ProjectDefinition::new("B", "repo-b", "rel_{version}", "stage_{version}"),
    ]
}
