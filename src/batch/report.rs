//! Result reporting - project outcomes back into configuration order

use crate::batch::execute::OutcomeMap;
use crate::error::{Error, Result};
use crate::types::{Outcome, ReportEntry, ResolvedRequest};
use tracing::error;

/// Failure message shown for a project the executor never recorded
pub const MISSING_OUTCOME_MESSAGE: &str = "no outcome was recorded for this project (internal error)";

/// The final, ordered report of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// One entry per planned request, in plan order
    pub entries: Vec<ReportEntry>,
    /// Projects that had no recorded outcome
    pub missing: Vec<String>,
}

impl Report {
    /// Number of successful projects
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_success()).count()
    }

    /// Number of failed projects (including missing outcomes)
    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }

    /// Whether every planned project had an outcome
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Turn missing outcomes into an error.
    ///
    /// A missing outcome means a result could be silently lost, so callers
    /// print the report first and then fail the run with this.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::Internal(format!(
                "no outcome recorded for: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Render outcomes in the order of `requests`.
///
/// Completion order of the concurrent batch has no influence on the result.
/// Missing outcomes still get an entry (a failure) and are listed in
/// [`Report::missing`].
pub fn render_report(requests: &[ResolvedRequest], outcomes: &OutcomeMap) -> Report {
    let mut report = Report::default();

    for request in requests {
        let outcome = if let Some(outcome) = outcomes.get(&request.name) {
            outcome.clone()
        } else {
            error!(project = %request.name, "no outcome recorded");
            report.missing.push(request.name.clone());
            Outcome::Failure {
                message: MISSING_OUTCOME_MESSAGE.to_string(),
            }
        };

        report.entries.push(ReportEntry {
            project_name: request.name.clone(),
            outcome,
        });
    }

    report
}
