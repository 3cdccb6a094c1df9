//! Authentication for GitHub
//!
//! Resolves a bearer token from the gh CLI or the environment and wraps it
//! in a [`Credential`] that is passed explicitly to every hosting call.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, test_github_auth};

use crate::error::{Error, Result};
use std::fmt;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the gh CLI
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// Bearer credential for the hosting API
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting blank values
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::Unauthorized("missing access token".to_string()));
        }
        Ok(Self(token))
    }

    /// Raw token for request headers
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
