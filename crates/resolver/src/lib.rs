#![allow(clippy::collapsible_if)]
pub mod links;
pub mod pipeline;
pub mod scope;
pub mod search;
pub mod variants;

#[cfg(test)]
pub(crate) mod test_support;

use shareflix_webshare::SearchOptions;

/// What to do when the backend rejects the held session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthRetry {
    /// Treat the rejection like any other failed call.
    Never,
    /// Log in again and replay the rejected call, at most once per resolution.
    #[default]
    Once,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown auth retry policy: {0} (expected `once` or `never`)")]
pub struct UnknownAuthRetry(pub String);

impl AuthRetry {
    pub fn parse(raw: &str) -> Result<Self, UnknownAuthRetry> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "never" => Ok(Self::Never),
            _ => Err(UnknownAuthRetry(raw.to_string())),
        }
    }

    /// Number of forced re-logins allowed per resolution.
    pub fn budget(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::Once => 1,
        }
    }
}

/// Tunables for one [`pipeline::StreamResolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverConfig {
    pub search: SearchOptions,
    pub auth_retry: AuthRetry,
}
