//! Progress reporting for batch execution

use crate::types::{Outcome, ResolvedRequest};
use async_trait::async_trait;

/// Callbacks invoked by the executor as requests start and finish
///
/// Calls for different projects interleave in any order; for a single
/// project `on_request_started` always precedes `on_request_finished`.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A project's pull request is about to be created
    async fn on_request_started(&self, request: &ResolvedRequest);

    /// A project reached its terminal outcome
    async fn on_request_finished(&self, request: &ResolvedRequest, outcome: &Outcome);

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that ignores everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_request_started(&self, _request: &ResolvedRequest) {}

    async fn on_request_finished(&self, _request: &ResolvedRequest, _outcome: &Outcome) {}

    async fn on_message(&self, _message: &str) {}
}
