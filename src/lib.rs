//! cv-pull-request - batch merge pull requests for release branches
//!
//! Every configured project names a head/base branch template containing a
//! `{version}` placeholder. For a given release version the crate resolves the
//! branch names, opens one pull request per project concurrently, and reports
//! a per-project outcome in configuration order.

pub mod batch;
pub mod config;
pub mod error;
pub mod platform;
pub mod types;
