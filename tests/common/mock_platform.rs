//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use cv_pull_request::error::{Error, Result};
use cv_pull_request::platform::PlatformService;
use cv_pull_request::types::{CreatedPullRequest, NewPullRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Call record for `add_assignees`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAssigneesCall {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub assignees: Vec<String>,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Per-repository error injection and response delays
/// - Completion order and peak concurrency tracking
pub struct MockPlatformService {
    next_pr_number: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    // Call tracking
    create_calls: Mutex<Vec<NewPullRequest>>,
    assignee_calls: Mutex<Vec<AddAssigneesCall>>,
    completion_order: Mutex<Vec<String>>,
    // Configured behavior, keyed by repository name
    create_urls: Mutex<HashMap<String, String>>,
    create_errors: Mutex<HashMap<String, String>>,
    assignee_errors: Mutex<HashMap<String, String>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create a mock where every call succeeds immediately
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            create_calls: Mutex::new(Vec::new()),
            assignee_calls: Mutex::new(Vec::new()),
            completion_order: Mutex::new(Vec::new()),
            create_urls: Mutex::new(HashMap::new()),
            create_errors: Mutex::new(HashMap::new()),
            assignee_errors: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    // === Behavior configuration ===

    /// Make `create_pull_request` fail for `repo`
    pub fn fail_create(&self, repo: &str, msg: &str) {
        self.create_errors
            .lock()
            .unwrap()
            .insert(repo.to_string(), msg.to_string());
    }

    /// Make `add_assignees` fail for `repo`
    pub fn fail_assignees(&self, repo: &str, msg: &str) {
        self.assignee_errors
            .lock()
            .unwrap()
            .insert(repo.to_string(), msg.to_string());
    }

    /// Return `url` as the created pull request link for `repo`
    pub fn set_create_url(&self, repo: &str, url: &str) {
        self.create_urls
            .lock()
            .unwrap()
            .insert(repo.to_string(), url.to_string());
    }

    /// Delay the create call for `repo`
    pub fn set_delay(&self, repo: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(repo.to_string(), delay);
    }

    // === Call verification methods ===

    /// Get all `create_pull_request` calls
    pub fn get_create_calls(&self) -> Vec<NewPullRequest> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Get all `add_assignees` calls
    pub fn get_assignee_calls(&self) -> Vec<AddAssigneesCall> {
        self.assignee_calls.lock().unwrap().clone()
    }

    /// Repositories in the order their create call finished
    pub fn get_completion_order(&self) -> Vec<String> {
        self.completion_order.lock().unwrap().clone()
    }

    /// Highest number of create calls that were in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Assert that `create_pull_request` was called with specific head and base
    pub fn assert_create_called(&self, repo: &str, head: &str, base: &str) {
        let calls = self.get_create_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.repo == repo && c.head == head && c.base == base),
            "Expected create_pull_request({repo}, {head}, {base}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn create_pull_request(&self, request: &NewPullRequest) -> Result<CreatedPullRequest> {
        self.create_calls.lock().unwrap().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&request.repo).copied();
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            // Still yield so sibling requests get to start
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completion_order
            .lock()
            .unwrap()
            .push(request.repo.clone());

        if let Some(msg) = self.create_errors.lock().unwrap().get(&request.repo) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let html_url = self
            .create_urls
            .lock()
            .unwrap()
            .get(&request.repo)
            .cloned()
            .unwrap_or_else(|| {
                format!(
                    "https://github.com/{}/{}/pull/{number}",
                    request.owner, request.repo
                )
            });

        Ok(CreatedPullRequest { number, html_url })
    }

    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<()> {
        self.assignee_calls.lock().unwrap().push(AddAssigneesCall {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            assignees: assignees.to_vec(),
        });

        if let Some(msg) = self.assignee_errors.lock().unwrap().get(repo) {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }
}
