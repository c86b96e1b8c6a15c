use shareflix_core::types::{FileRecord, SortOrder};

use crate::{SearchOptions, WebshareError};

/// Operations offered by the file-sharing backend.
#[async_trait::async_trait]
pub trait WebshareApi: Send + Sync {
    /// Fetch the per-account salt used by the login digest.
    async fn salt(&self, username: &str) -> Result<String, WebshareError>;

    /// Log in with a precomputed digest and return the session token.
    async fn login(
        &self,
        username: &str,
        password_hash: &str,
        digest: &str,
    ) -> Result<String, WebshareError>;

    /// Full-text search over video files. Records come back in backend order.
    async fn search(
        &self,
        token: &str,
        query: &str,
        sort: SortOrder,
        options: SearchOptions,
    ) -> Result<Vec<FileRecord>, WebshareError>;

    /// Exchange a file ident for a direct, time-limited download URL.
    ///
    /// `Ok(None)` means the backend answered but offered no link.
    async fn file_link(
        &self,
        token: &str,
        ident: &str,
        device_id: &str,
    ) -> Result<Option<String>, WebshareError>;
}
