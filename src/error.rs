//! Error types for cv-pull-request

use thiserror::Error;

/// Errors that can occur while planning, executing, or reporting a batch
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Hosting API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Interactive prompt failed (closed stdin, no terminal)
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal consistency failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The bare message, without the category prefix.
    ///
    /// Used as the user-facing detail of a failed project.
    pub fn detail(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::GitHubApi(msg)
            | Self::Prompt(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(github_error_detail(&err))
    }
}

/// Pick the most specific message out of an octocrab error.
///
/// GitHub validation failures carry a list of sub-errors; the first one's
/// `message` is what a person needs to see ("No commits between a and b").
/// Otherwise fall back to the top-level API message, then to the error's
/// display form for transport-level failures.
pub fn github_error_detail(err: &octocrab::Error) -> String {
    if let octocrab::Error::GitHub { source, .. } = err {
        let first_sub_error = source
            .errors
            .as_ref()
            .and_then(|errors| errors.first())
            .and_then(|first| first.get("message"))
            .and_then(serde_json::Value::as_str)
            .filter(|msg| !msg.is_empty());

        if let Some(msg) = first_sub_error {
            return msg.to_string();
        }
        if !source.message.is_empty() {
            return source.message.clone();
        }
    }
    err.to_string()
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
