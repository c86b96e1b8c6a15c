use std::future::Future;

use shareflix_webshare::WebshareError;
use shareflix_webshare::session::{Session, SessionManager};
use tracing::warn;

use crate::AuthRetry;

/// The session used by one resolution, with its re-login allowance.
pub struct SessionScope<'a> {
    sessions: &'a SessionManager,
    session: Session,
    relogins_left: u8,
}

impl<'a> SessionScope<'a> {
    pub fn new(sessions: &'a SessionManager, session: Session, policy: AuthRetry) -> Self {
        Self {
            sessions,
            session,
            relogins_left: policy.budget(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run an authenticated call.
    ///
    /// If the backend rejects the token and the allowance is not spent, the
    /// token is invalidated, a fresh login is made and `call` runs once more.
    pub async fn call<T, F, Fut>(&mut self, call: F) -> Result<T, WebshareError>
    where
        F: Fn(Session) -> Fut,
        Fut: Future<Output = Result<T, WebshareError>>,
    {
        match call(self.session.clone()).await {
            Err(e) if e.is_auth_failure() && self.relogins_left > 0 => {
                self.relogins_left -= 1;
                warn!(error = %e, "session token rejected; logging in again");
                self.sessions.invalidate(&self.session.token).await;
                match self.sessions.ensure_session().await {
                    Some(fresh) => {
                        self.session = fresh;
                        call(self.session.clone()).await
                    }
                    None => Err(e),
                }
            }
            other => other,
        }
    }
}
