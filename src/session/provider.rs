//! Session state provider.
//!
//! Owns the current [`Session`], applies login, logout and password-change
//! outcomes to it, and notifies subscribers synchronously after every
//! change. Backend and store calls are executed as effects against a
//! caller-supplied environment; the provider itself holds no I/O handles.

use super::credentials::{AuthToken, Credentials, PasswordChange, UserProfile};
use super::effects;
use super::error::AuthError;
use super::policy::{check_credentials, into_auth_result, PasswordPolicy};
use super::state::{Session, SessionEvent, SessionPhase};
use super::SessionEnv;
use crate::core::{State, StateHistory, StateTransition};
use crate::store::StoredCredentials;
use chrono::Utc;
use std::fmt;
use stillwater::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Transitions kept in a provider's history by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Callback invoked with the new session after every change.
pub type SessionObserver = Box<dyn Fn(&Session) + Send + Sync>;

/// Handle returned by [`SessionProvider::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the session state.
pub struct SessionProvider {
    session: Session,
    credentials: Option<StoredCredentials>,
    history: StateHistory<SessionPhase, SessionEvent>,
    history_limit: usize,
    observers: Vec<(SubscriptionId, SessionObserver)>,
    next_subscription: u64,
    initialized: bool,
    policy: PasswordPolicy,
}

impl SessionProvider {
    /// Provider in the initial loading state with the default password policy.
    pub fn new() -> Self {
        Self::with_policy(PasswordPolicy::default())
    }

    pub fn with_policy(policy: PasswordPolicy) -> Self {
        Self {
            session: Session::initial(),
            credentials: None,
            history: StateHistory::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            observers: Vec::new(),
            next_subscription: 0,
            initialized: false,
            policy,
        }
    }

    /// Keep at most `limit` transitions, dropping the oldest first.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.credentials.as_ref().map(|record| &record.user)
    }

    /// Identifier of the current login, if signed in.
    pub fn session_id(&self) -> Option<Uuid> {
        self.credentials.as_ref().map(|record| record.session_id)
    }

    pub fn history(&self) -> &StateHistory<SessionPhase, SessionEvent> {
        &self.history
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register an observer. It is not called for the current state, only
    /// for subsequent changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Load persisted credentials and leave the loading state.
    ///
    /// Never fails: store errors, undecodable records and expired tokens all
    /// end in a signed-out session. Calling it again after completion is a
    /// no-op.
    pub async fn initialize<Env: SessionEnv>(&mut self, env: &Env) {
        if self.initialized {
            debug!("session provider already initialized");
            return;
        }

        let loaded = effects::load_credentials::<Env>().run(env).await;
        let now = Utc::now();
        let restored = match loaded {
            Ok(Some(record)) if record.is_expired_at(now) => {
                info!(session_id = %record.session_id, "persisted session expired");
                if let Err(err) = effects::clear_credentials::<Env>().run(env).await {
                    warn!(error = %err, "failed to clear expired credentials");
                }
                None
            }
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "failed to load persisted credentials, starting signed out");
                None
            }
        };

        self.initialized = true;
        match restored {
            Some(record) => self.enter_signed_in(record, SessionEvent::Restored),
            None => self.apply(Session::signed_out(), SessionEvent::StartedSignedOut),
        }
    }

    /// Authenticate with the backend.
    ///
    /// On failure the session is left exactly as it was.
    pub async fn login<Env: SessionEnv>(
        &mut self,
        env: &Env,
        credentials: Credentials,
    ) -> Result<(), AuthError> {
        if self.session.is_loading() {
            return Err(AuthError::SessionLoading);
        }
        into_auth_result(check_credentials(&credentials))?;

        let grant = effects::authenticate::<Env>(credentials)
            .run(env)
            .await
            .inspect_err(|err| warn!(error = %err, "login failed"))?;

        let record = StoredCredentials::from_grant(grant, Utc::now());
        self.persist(env, &record).await;
        self.enter_signed_in(record, SessionEvent::SignedIn);
        Ok(())
    }

    /// Clear the forced password change flag and persist the updated record.
    ///
    /// No-op unless the session is authenticated and the flag is set.
    pub async fn complete_password_change<Env: SessionEnv>(&mut self, env: &Env) {
        if !self.session.is_authenticated() {
            debug!("password change completion ignored, not authenticated");
            return;
        }
        if !self.session.must_change_password() {
            return;
        }
        if let Some(record) = self.credentials.as_mut() {
            record.must_change_password = false;
        }
        if let Some(record) = self.credentials.clone() {
            self.persist(env, &record).await;
        }
        self.apply(Session::signed_in(false), SessionEvent::PasswordChanged);
    }

    /// Validate and submit a new password, then complete the forced change.
    pub async fn change_password<Env: SessionEnv>(
        &mut self,
        env: &Env,
        change: PasswordChange,
    ) -> Result<(), AuthError> {
        let token = self.active_token()?;
        into_auth_result(self.policy.check(&change))?;

        effects::submit_password_change::<Env>(token, change)
            .run(env)
            .await
            .inspect_err(|err| warn!(error = %err, "password change failed"))?;

        self.complete_password_change(env).await;
        Ok(())
    }

    /// Re-check the current token with the backend.
    ///
    /// A definitive rejection signs the user out. A network failure keeps
    /// the session untouched and is returned to the caller.
    pub async fn revalidate<Env: SessionEnv>(&mut self, env: &Env) -> Result<(), AuthError> {
        let token = self.active_token()?;

        match effects::verify_token::<Env>(token).run(env).await {
            Ok(verified) => {
                if verified.must_change_password != self.session.must_change_password() {
                    if let Some(record) = self.credentials.as_mut() {
                        record.must_change_password = verified.must_change_password;
                    }
                    if let Some(record) = self.credentials.clone() {
                        self.persist(env, &record).await;
                    }
                    self.apply(
                        Session::signed_in(verified.must_change_password),
                        SessionEvent::Revalidated,
                    );
                }
                Ok(())
            }
            Err(AuthError::InvalidCredentials) => {
                info!(session_id = ?self.session_id(), "session token rejected, signing out");
                self.discard(env).await;
                self.sign_out(SessionEvent::Revoked);
                Err(AuthError::InvalidCredentials)
            }
            Err(err) => {
                warn!(error = %err, "session re-check failed, keeping current session");
                Err(err)
            }
        }
    }

    /// Sign out and forget persisted credentials.
    ///
    /// The provider ends resolved and unauthenticated. The token is revoked
    /// with the backend on a best-effort basis; backend and store failures
    /// are logged.
    pub async fn logout<Env: SessionEnv>(&mut self, env: &Env) {
        if let Ok(token) = self.active_token() {
            if let Err(err) = effects::revoke_token::<Env>(token).run(env).await {
                warn!(error = %err, "failed to revoke session token");
            }
        }
        self.discard(env).await;
        self.initialized = true;
        self.sign_out(SessionEvent::SignedOut);
    }

    fn active_token(&self) -> Result<AuthToken, AuthError> {
        match &self.credentials {
            Some(record) if self.session.is_authenticated() => Ok(record.token.clone()),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    async fn persist<Env: SessionEnv>(&self, env: &Env, record: &StoredCredentials) {
        if let Err(err) = effects::save_credentials::<Env>(record.clone()).run(env).await {
            warn!(error = %err, session_id = %record.session_id, "failed to persist credentials");
        }
    }

    async fn discard<Env: SessionEnv>(&self, env: &Env) {
        if let Err(err) = effects::clear_credentials::<Env>().run(env).await {
            warn!(error = %err, "failed to clear persisted credentials");
        }
    }

    fn enter_signed_in(&mut self, record: StoredCredentials, event: SessionEvent) {
        let next = Session::signed_in(record.must_change_password);
        info!(session_id = %record.session_id, user = %record.user.id, "session established");
        self.credentials = Some(record);
        self.apply(next, event);
    }

    fn sign_out(&mut self, event: SessionEvent) {
        self.credentials = None;
        self.apply(Session::signed_out(), event);
    }

    /// Record the change and notify observers.
    fn apply(&mut self, next: Session, event: SessionEvent) {
        let from = self.session.phase();
        let to = next.phase();
        self.session = next;
        self.history.push_bounded(
            StateTransition {
                from,
                to,
                timestamp: Utc::now(),
                event,
            },
            self.history_limit,
        );
        info!(from = from.name(), to = to.name(), event = ?event, "session changed");

        for (_, observer) in &self.observers {
            observer(&self.session);
        }
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionProvider")
            .field("session", &self.session)
            .field("session_id", &self.session_id())
            .field("observers", &self.observers.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}
