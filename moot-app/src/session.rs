//! The single authoritative record of who is using this client.
//!
//! Every page and the navigation bar read from one [`SessionStore`]; only the
//! named operations below mutate it. The store is constructed once at startup
//! and passed by reference wherever it is needed.

use std::future::Future;

use moot_client::{AuthApi, ClientError, CredentialStore, Result, StoredSession};
use moot_common::requests::{LoginRequest, RegisterRequest};
use moot_common::{AuthResponse, UserSummary};

pub struct SessionStore<S: CredentialStore> {
    credentials: S,
    user: Option<UserSummary>,
    is_authenticated: bool,
    loading: bool,
    last_error: Option<String>,
}

impl<S: CredentialStore> SessionStore<S> {
    pub fn new(credentials: S) -> Self {
        Self {
            credentials,
            user: None,
            is_authenticated: false,
            loading: false,
            last_error: None,
        }
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn credentials(&self) -> &S {
        &self.credentials
    }

    /// Reads any persisted identity and installs its token into the
    /// transport, so a process restart does not force a re-login.
    ///
    /// An unreadable cache is discarded and the session stays anonymous; the
    /// worst case is one extra login.
    pub fn restore<A: AuthApi>(&mut self, api: &A) {
        match self.credentials.load() {
            Ok(Some(stored)) => {
                api.adopt_token(&stored.token);
                self.user = Some(stored.user);
                self.is_authenticated = true;
                tracing::debug!("session restored from storage");
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable session cache");
                if let Err(err) = self.credentials.clear() {
                    tracing::warn!(error = %err, "failed to discard session cache");
                }
            }
        }
    }

    pub async fn login<A: AuthApi>(
        &mut self,
        api: &A,
        credentials: &LoginRequest,
    ) -> Result<AuthResponse> {
        let call = api.login(credentials);
        self.finish_auth(call).await
    }

    pub async fn register<A: AuthApi>(
        &mut self,
        api: &A,
        details: &RegisterRequest,
    ) -> Result<AuthResponse> {
        let call = api.register(details);
        self.finish_auth(call).await
    }

    async fn finish_auth(
        &mut self,
        call: impl Future<Output = Result<AuthResponse>>,
    ) -> Result<AuthResponse> {
        if self.loading {
            tracing::warn!("auth call issued while another is in flight; last write wins");
        }
        self.loading = true;
        self.last_error = None;
        let outcome = match call.await {
            Ok(response) => {
                self.user = Some(response.user.clone());
                self.is_authenticated = true;
                self.persist(&response);
                Ok(response)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        };
        // Released on every exit path, success or failure.
        self.loading = false;
        outcome
    }

    /// Unconditional replace, used after profile edits. Leaves `loading` and
    /// `last_error` alone, and writes the identity back to storage so a
    /// reload sees the edited profile.
    pub fn set_user(&mut self, user: UserSummary) {
        match self.credentials.load() {
            Ok(Some(mut stored)) => {
                stored.user = user.clone();
                if let Err(err) = self.credentials.save(&stored) {
                    tracing::warn!(error = %err, "failed to write profile back to storage");
                }
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "failed to read stored session"),
        }
        self.user = Some(user);
        self.is_authenticated = true;
    }

    /// Discards the bearer token and the persisted identity, then resets to
    /// the anonymous state. Calling it twice is a no-op the second time.
    ///
    /// The in-memory reset happens even when the storage delete fails; the
    /// failure is still reported because credentials were left on disk.
    pub fn logout<A: AuthApi>(&mut self, api: &A) -> Result<()> {
        api.discard_token();
        let cleared = self.credentials.clear();
        self.user = None;
        self.is_authenticated = false;
        tracing::debug!("session cleared");
        cleared
    }

    /// Translates a failure from any facade call: an authentication failure
    /// means the credential is missing or expired, so the session drops to
    /// anonymous and the user is routed back to login.
    pub fn handle_failure<A: AuthApi>(&mut self, api: &A, err: &ClientError) {
        if !err.is_auth() {
            return;
        }
        tracing::debug!(error = %err, "credential rejected, expiring session");
        api.discard_token();
        if let Err(err) = self.credentials.clear() {
            tracing::warn!(error = %err, "failed to discard session cache");
        }
        self.user = None;
        self.is_authenticated = false;
        self.last_error = Some(err.to_string());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn persist(&mut self, response: &AuthResponse) {
        let stored = StoredSession {
            token: response.token.clone(),
            user: response.user.clone(),
        };
        // The user did authenticate; a cache failure only costs the next restart.
        if let Err(err) = self.credentials.save(&stored) {
            tracing::warn!(error = %err, "failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_auth_response, viewer, FailWith, FakeApi};
    use moot_client::MemoryCredentials;
    use moot_common::UserId;

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        }
    }

    fn store() -> SessionStore<MemoryCredentials> {
        SessionStore::new(MemoryCredentials::default())
    }

    #[tokio::test]
    async fn login_populates_session_and_persists() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = store();

        session.login(&api, &login_request()).await?;

        assert_eq!(session.user().map(|u| u.id), Some(UserId(1)));
        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.last_error(), None);
        let stored = session.credentials().load()?.expect("persisted");
        assert_eq!(stored.token, "tok-1");
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_sets_error_and_releases_loading() {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        api.fail_next(FailWith::Validation("invalid credentials"));
        let mut session = store();

        let result = session.login(&api, &login_request()).await;

        assert!(result.is_err());
        assert_eq!(session.last_error(), Some("invalid credentials"));
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        // Nothing was persisted either.
        assert_eq!(session.credentials().load().unwrap(), None);
    }

    #[tokio::test]
    async fn login_then_logout_equals_initial_state() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = store();

        session.login(&api, &login_request()).await?;
        session.logout(&api)?;

        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.last_error(), None);
        assert_eq!(session.credentials().load()?, None);
        assert!(!api.has_token());

        // Logging out again is a no-op.
        session.logout(&api)?;
        assert!(session.user().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn register_follows_the_login_contract() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = store();

        let details = RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            display_name: "Ada".into(),
            password: "hunter2".into(),
        };
        session.register(&api, &details).await?;
        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn restore_adopts_persisted_identity() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());

        let mut first = store();
        first.login(&api, &login_request()).await?;
        let stored = first.credentials().load()?.expect("persisted");

        let mut credentials = MemoryCredentials::default();
        credentials.save(&stored)?;
        api.discard_token();

        let mut second = SessionStore::new(credentials);
        second.restore(&api);
        assert!(second.is_authenticated());
        assert_eq!(second.user().map(|u| u.username.as_str()), Some("ada"));
        assert!(api.has_token());
        Ok(())
    }

    #[tokio::test]
    async fn set_user_writes_back_without_touching_flags() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = store();
        session.login(&api, &login_request()).await?;

        let mut updated = viewer();
        updated.display_name = "Ada L.".into();
        updated.bio = Some("event planner".into());
        session.set_user(updated.clone());

        assert_eq!(session.user(), Some(&updated));
        let stored = session.credentials().load()?.expect("persisted");
        assert_eq!(stored.user.display_name, "Ada L.");
        // The token survives a profile write-back.
        assert_eq!(stored.token, "tok-1");
        Ok(())
    }

    #[tokio::test]
    async fn auth_failure_expires_the_session() -> anyhow::Result<()> {
        let api = FakeApi::new(viewer());
        api.set_auth_response(sample_auth_response());
        let mut session = store();
        session.login(&api, &login_request()).await?;

        // An expired credential surfaces as an Auth failure from any facade call.
        api.fail_next(FailWith::Auth);
        let err = moot_client::EventsApi::my_events(&api)
            .await
            .expect_err("scripted failure");
        session.handle_failure(&api, &err);

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!api.has_token());
        assert_eq!(session.credentials().load()?, None);
        assert!(session.last_error().is_some());

        // Non-auth failures leave the session alone.
        let mut session = store();
        session.login(&api, &login_request()).await?;
        session.handle_failure(&api, &ClientError::Transport("connection reset".into()));
        assert!(session.is_authenticated());
        Ok(())
    }

    #[test]
    fn clear_error_resets_the_banner() {
        let mut session = store();
        session.last_error = Some("boom".into());
        session.clear_error();
        assert_eq!(session.last_error(), None);
    }
}
