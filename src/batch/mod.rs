//! Batch pull request engine
//!
//! Four stages, each consuming only the output of the previous one:
//! 1. Template - substitute the release version into branch names (pure)
//! 2. Plan - merge global settings into each project (pure) and confirm
//! 3. Execute - open every pull request concurrently (effectful)
//! 4. Report - project outcomes back into configuration order (pure)

mod execute;
mod plan;
mod progress;
mod report;
mod template;

pub use execute::{OutcomeMap, PR_BODY, execute_requests, pr_title, pull_request_for};
pub use plan::{PlanApproval, build_plan, confirm_plan, resolve_request};
pub use progress::{NoopProgress, ProgressCallback};
pub use report::{MISSING_OUTCOME_MESSAGE, Report, render_report};
pub use template::{VERSION_PLACEHOLDER, resolve};
