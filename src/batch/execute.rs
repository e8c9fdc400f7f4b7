//! Batch execution - effectful operations
//!
//! Takes the resolved requests produced by the planner and opens one pull
//! request per project through the platform API. All projects run
//! concurrently; each one ends in exactly one [`Outcome`] and no project's
//! failure affects another.

use crate::batch::progress::ProgressCallback;
use crate::platform::PlatformService;
use crate::types::{AssigneeFailurePolicy, NewPullRequest, Outcome, ResolvedRequest};
use futures::future::join_all;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

/// Markdown body of every generated pull request
pub const PR_BODY: &str = "Weekly build trigger for DTE Gold Test

## Merge Checklist
* [ ] Verify correct merge branches
* [ ] Resolve any and all branch merge conflicts, if they exist
* [ ] Tag merge commit after merging

**Important Note!** Do **NOT** delete the head branch after completing the pull request merge!";

/// Pull request title: `"{name} {version} {date} Merge Dev Branch into Test Branch"`
pub fn pr_title(request: &ResolvedRequest) -> String {
    format!(
        "{} {} {} Merge Dev Branch into Test Branch",
        request.name, request.version, request.date
    )
}

/// Parameters of the create call for `request`
pub fn pull_request_for(request: &ResolvedRequest) -> NewPullRequest {
    NewPullRequest {
        owner: request.owner.clone(),
        repo: request.repo.clone(),
        title: pr_title(request),
        head: request.head.clone(),
        base: request.base.clone(),
        body: PR_BODY.to_string(),
    }
}

/// Outcomes of one batch, keyed by project name
///
/// Write-once: the first outcome recorded for a project is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeMap {
    outcomes: HashMap<String, Outcome>,
}

impl OutcomeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `outcome` for `project`.
    ///
    /// Returns `false` (and keeps the existing value) if the project already
    /// has an outcome.
    pub fn record(&mut self, project: impl Into<String>, outcome: Outcome) -> bool {
        match self.outcomes.entry(project.into()) {
            Entry::Occupied(existing) => {
                warn!(project = %existing.key(), "outcome already recorded, keeping the first");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
        }
    }

    /// Outcome for `project`, if recorded
    pub fn get(&self, project: &str) -> Option<&Outcome> {
        self.outcomes.get(project)
    }

    /// Number of recorded outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Execute every request concurrently (EFFECTFUL)
///
/// Returns once every request has reached a terminal outcome. Failures are
/// converted to [`Outcome::Failure`] at the request boundary, so this never
/// fails and never short-circuits.
///
/// # Arguments
/// * `requests` - Resolved requests from `build_plan()`
/// * `platform` - Platform service for API calls, shared by all requests
/// * `policy` - Whether an assignee failure downgrades a created pull request
/// * `progress` - Progress callback for status updates
pub async fn execute_requests(
    requests: &[ResolvedRequest],
    platform: &dyn PlatformService,
    policy: AssigneeFailurePolicy,
    progress: &dyn ProgressCallback,
) -> OutcomeMap {
    progress
        .on_message(&format!("Creating {} pull request(s)", requests.len()))
        .await;

    let finished = join_all(
        requests
            .iter()
            .map(|request| execute_request(request, platform, policy, progress)),
    )
    .await;

    let mut outcomes = OutcomeMap::new();
    for (request, outcome) in requests.iter().zip(finished) {
        outcomes.record(request.name.clone(), outcome);
    }
    outcomes
}

/// Create one pull request and assign people to it
async fn execute_request(
    request: &ResolvedRequest,
    platform: &dyn PlatformService,
    policy: AssigneeFailurePolicy,
    progress: &dyn ProgressCallback,
) -> Outcome {
    progress.on_request_started(request).await;

    let outcome = match platform.create_pull_request(&pull_request_for(request)).await {
        Ok(created) => {
            debug!(project = %request.name, number = created.number, "created pull request");
            let assigned = if request.assignees.is_empty() {
                Ok(())
            } else {
                platform
                    .add_assignees(
                        &request.owner,
                        &request.repo,
                        created.number,
                        &request.assignees,
                    )
                    .await
            };

            match (assigned, policy) {
                (Ok(()), _) => Outcome::Success {
                    reference_url: created.html_url,
                },
                (Err(e), AssigneeFailurePolicy::Ignore) => {
                    warn!(
                        project = %request.name,
                        error = %e,
                        "pull request created but assigning failed"
                    );
                    Outcome::Success {
                        reference_url: created.html_url,
                    }
                }
                (Err(e), AssigneeFailurePolicy::Fail) => Outcome::Failure {
                    message: format!(
                        "{} (pull request was created: {})",
                        e.detail(),
                        created.html_url
                    ),
                },
            }
        }
        Err(e) => {
            debug!(project = %request.name, error = %e, "create pull request failed");
            Outcome::Failure { message: e.detail() }
        }
    };

    progress.on_request_finished(request, &outcome).await;
    outcome
}
