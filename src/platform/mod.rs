//! Hosting platform services
//!
//! The executor only talks to the [`PlatformService`] trait, so tests can
//! substitute a mock and GitHub Enterprise only differs by base URL.

mod github;

pub use github::{GitHubService, GitHubServiceOptions, web_base_url};

use crate::error::Result;
use crate::types::{CreatedPullRequest, NewPullRequest};
use async_trait::async_trait;

/// Pull request operations needed by the batch executor
///
/// Implementations are shared read-only across all concurrent requests of a
/// batch, hence `Send + Sync`.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Open a pull request
    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<CreatedPullRequest>;

    /// Assign people to an existing pull request (by its issue number)
    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<()>;
}
