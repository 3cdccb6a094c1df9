//! Error types for taxonomy-contrib
//!
//! A small closed taxonomy. Every hosting API failure is classified by HTTP
//! status so callers can tell retryable failures from terminal ones.

use thiserror::Error;

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the publishing pipeline and the tree fetcher
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or rejected credential (absent token, HTTP 401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A hosting API resource does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Network failure or any other non-success response
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Structured text that failed to parse or had the wrong shape
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A pull request lacks a file the edit flow needs
    #[error("missing file: {0}")]
    MissingFile(String),

    /// Configuration is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify an HTTP status and message from the hosting API
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(format!("HTTP {status}: {message}")),
            404 => Self::NotFound(message),
            _ => Self::UpstreamUnavailable(format!("HTTP {status}: {message}")),
        }
    }

    /// Whether re-issuing the same operation later could succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                Self::from_status(source.status_code.as_u16(), source.message.clone())
            }
            _ => Self::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

/// Failure surfaced at the publishing boundary
///
/// Carries a display title (what the workflow was doing) alongside the
/// classified cause, so a front end can show both without inspecting
/// the error chain.
#[derive(Debug, Error)]
#[error("{title}: {source}")]
pub struct PublishFailure {
    /// Short human-readable title, e.g. "Failed to create pull request"
    pub title: &'static str,
    /// Underlying classified error
    #[source]
    pub source: Error,
}

impl PublishFailure {
    /// Wrap an error under a display title
    pub const fn new(title: &'static str, source: Error) -> Self {
        Self { title, source }
    }

    /// Message suitable for direct display under the title
    pub fn message(&self) -> String {
        self.source.to_string()
    }

    /// Whether the underlying cause is retryable
    pub const fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
