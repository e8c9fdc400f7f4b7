//! Request planning - pure functions for building the batch
//!
//! No I/O happens here except through the caller-supplied [`PlanApproval`],
//! so the whole module is easy to unit test.

use crate::batch::template::resolve;
use crate::error::Result;
use crate::types::{GlobalSettings, ProjectDefinition, ResolvedRequest};

/// Asks the operator whether a plan may be executed
pub trait PlanApproval {
    /// Present `plan` and return whether to proceed
    fn approve(&self, plan: &[ResolvedRequest]) -> Result<bool>;
}

/// Merge one project with the global settings.
///
/// Project fields win where the project defines them (`name`, `repo`,
/// templates, and `owner` when set); everything else comes from `settings`.
pub fn resolve_request(settings: &GlobalSettings, project: &ProjectDefinition) -> ResolvedRequest {
    ResolvedRequest {
        name: project.name.clone(),
        owner: project
            .owner
            .clone()
            .unwrap_or_else(|| settings.owner.clone()),
        repo: project.repo.clone(),
        head: resolve(&project.head_template, &settings.version),
        base: resolve(&project.base_template, &settings.version),
        version: settings.version.clone(),
        date: settings.date.clone(),
        assignees: settings.assignees.clone(),
    }
}

/// Build the ordered list of requests (PURE - no I/O)
///
/// Output order matches `projects` order; the final report relies on it.
#[must_use]
pub fn build_plan(settings: &GlobalSettings, projects: &[ProjectDefinition]) -> Vec<ResolvedRequest> {
    projects
        .iter()
        .map(|project| resolve_request(settings, project))
        .collect()
}

/// Confirm the plan unless running in automatic mode.
///
/// Automatic mode returns `true` without touching `approval`, so unattended
/// runs never block on a prompt. Returns `false` when the operator declines.
pub fn confirm_plan(
    settings: &GlobalSettings,
    plan: &[ResolvedRequest],
    approval: &dyn PlanApproval,
) -> Result<bool> {
    if settings.automatic {
        return Ok(true);
    }
    approval.approve(plan)
}
