use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::WebshareApi;
use crate::digest::login_digest;
use crate::{Credentials, WebshareError};

/// An authenticated session usable for protected calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub device_id: String,
}

/// Owns the backend token for the lifetime of the process.
///
/// The token is obtained lazily and reused until a caller reports it stale
/// through [`SessionManager::invalidate`]. Logins are serialized, so callers
/// racing on an empty session share a single login.
pub struct SessionManager {
    api: Arc<dyn WebshareApi>,
    credentials: Credentials,
    device_id: String,
    token: Mutex<Option<String>>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn WebshareApi>, credentials: Credentials) -> Self {
        Self {
            api,
            credentials,
            device_id: uuid::Uuid::new_v4().to_string(),
            token: Mutex::new(None),
        }
    }

    /// Stable per-process device identifier sent with link requests.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Return the held session, logging in first if there is none.
    ///
    /// Returns `None` when login fails; the failure is logged, not raised.
    pub async fn ensure_session(&self) -> Option<Session> {
        let mut token = self.token.lock().await;
        if let Some(ref held) = *token {
            return Some(self.session(held));
        }

        match self.login().await {
            Ok(fresh) => {
                info!(username = %self.credentials.username, "Webshare login succeeded");
                let session = self.session(&fresh);
                *token = Some(fresh);
                Some(session)
            }
            Err(e) => {
                warn!(username = %self.credentials.username, error = %e, "Webshare login failed");
                None
            }
        }
    }

    /// Drop the held token if it is still `stale_token`.
    ///
    /// Returns whether anything was cleared. A token replaced by another
    /// caller's login in the meantime is left alone.
    pub async fn invalidate(&self, stale_token: &str) -> bool {
        let mut token = self.token.lock().await;
        if token.as_deref() == Some(stale_token) {
            *token = None;
            true
        } else {
            false
        }
    }

    /// The held session, without logging in.
    pub async fn current(&self) -> Option<Session> {
        self.token.lock().await.as_deref().map(|t| self.session(t))
    }

    async fn login(&self) -> Result<String, WebshareError> {
        let username = self.credentials.username.as_str();
        let salt = self.api.salt(username).await?;
        let digest = login_digest(username, &self.credentials.password, &salt);
        self.api
            .login(username, &digest.password, &digest.digest)
            .await
    }

    fn session(&self, token: &str) -> Session {
        Session {
            token: token.to_string(),
            device_id: self.device_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shareflix_core::types::{FileRecord, SortOrder};

    use super::*;
    use crate::SearchOptions;

    #[derive(Default)]
    struct FakeApi {
        logins: AtomicUsize,
        fail_login: bool,
        last_digest: std::sync::Mutex<Option<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl WebshareApi for FakeApi {
        async fn salt(&self, _username: &str) -> Result<String, WebshareError> {
            Ok("abc123".into())
        }

        async fn login(
            &self,
            _username: &str,
            password_hash: &str,
            digest: &str,
        ) -> Result<String, WebshareError> {
            let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
            *self.last_digest.lock().unwrap() = Some((password_hash.into(), digest.into()));
            tokio::task::yield_now().await;
            if self.fail_login {
                Err(WebshareError::MissingField("token"))
            } else {
                Ok(format!("token-{n}"))
            }
        }

        async fn search(
            &self,
            _token: &str,
            _query: &str,
            _sort: SortOrder,
            _options: SearchOptions,
        ) -> Result<Vec<FileRecord>, WebshareError> {
            Ok(vec![])
        }

        async fn file_link(
            &self,
            _token: &str,
            _ident: &str,
            _device_id: &str,
        ) -> Result<Option<String>, WebshareError> {
            Ok(None)
        }
    }

    fn creds() -> Credentials {
        Credentials {
            username: "alice".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn logs_in_once_and_reuses_token() {
        let api = Arc::new(FakeApi::default());
        let mgr = SessionManager::new(api.clone(), creds());

        let first = mgr.ensure_session().await.unwrap();
        let second = mgr.ensure_session().await.unwrap();

        assert_eq!(first.token, "token-1");
        assert_eq!(first, second);
        assert_eq!(api.logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn submits_hashed_password_and_digest() {
        let api = Arc::new(FakeApi::default());
        let mgr = SessionManager::new(api.clone(), creds());
        mgr.ensure_session().await.unwrap();

        let (password, digest) = api.last_digest.lock().unwrap().clone().unwrap();
        assert_eq!(password, "9c63b4f71813ca1298c166647308812f21fa01a5");
        assert_eq!(digest, "715db1ec619615c836bf3bd89a8cc150");
    }

    #[tokio::test]
    async fn failed_login_leaves_session_empty() {
        let api = Arc::new(FakeApi {
            fail_login: true,
            ..Default::default()
        });
        let mgr = SessionManager::new(api.clone(), creds());

        assert!(mgr.ensure_session().await.is_none());
        assert!(mgr.current().await.is_none());
        // Next call tries again.
        assert!(mgr.ensure_session().await.is_none());
        assert_eq!(api.logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_only_clears_matching_token() {
        let api = Arc::new(FakeApi::default());
        let mgr = SessionManager::new(api.clone(), creds());
        let session = mgr.ensure_session().await.unwrap();

        assert!(!mgr.invalidate("someone-elses-token").await);
        assert!(mgr.current().await.is_some());

        assert!(mgr.invalidate(&session.token).await);
        assert!(mgr.current().await.is_none());

        let renewed = mgr.ensure_session().await.unwrap();
        assert_eq!(renewed.token, "token-2");
        assert_eq!(renewed.device_id, session.device_id);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_login() {
        let api = Arc::new(FakeApi::default());
        let mgr = Arc::new(SessionManager::new(api.clone(), creds()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mgr = mgr.clone();
                tokio::spawn(async move { mgr.ensure_session().await })
            })
            .collect();

        for handle in handles {
            let session = handle.await.unwrap().unwrap();
            assert_eq!(session.token, "token-1");
        }
        assert_eq!(api.logins.load(Ordering::SeqCst), 1);
    }
}
