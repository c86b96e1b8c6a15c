#![allow(clippy::collapsible_if)]
pub mod api;
pub mod client;
pub mod digest;
pub mod session;
mod xml;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebshareError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned {status}: {code} {message}")]
    Api {
        status: String,
        code: String,
        message: String,
    },
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("response is missing <{0}>")]
    MissingField(&'static str),
}

impl WebshareError {
    /// Whether the failure means the session token is no longer accepted.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Account credentials for the file-sharing backend.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Search request parameters that do not vary between trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { limit: 50 }
    }
}
