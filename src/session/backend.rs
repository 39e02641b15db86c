//! Auth backend seam and an in-process implementation.

use super::credentials::{AuthToken, Credentials, LoginGrant, PasswordChange, UserProfile, VerifiedToken};
use super::error::AuthError;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Remote authentication service.
///
/// Implementations map transport failures to [`AuthError::Network`] and
/// definitive refusals to [`AuthError::InvalidCredentials`].
pub trait AuthBackend {
    fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError>;

    /// Re-check a previously issued token.
    fn verify(&self, token: &AuthToken) -> Result<VerifiedToken, AuthError>;

    fn change_password(&self, token: &AuthToken, change: &PasswordChange) -> Result<(), AuthError>;

    /// Invalidate a single token. Unknown tokens are not an error.
    fn revoke(&self, token: &AuthToken) -> Result<(), AuthError>;
}

struct Account {
    password: String,
    user: UserProfile,
    must_change_password: bool,
}

#[derive(Default)]
struct BackendState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    offline: bool,
    token_ttl: Option<Duration>,
}

/// Account registry held in memory.
///
/// Clones share the same registry, so a test or demo can keep a handle to
/// toggle connectivity or revoke tokens while the provider uses another.
#[derive(Clone, Default)]
pub struct InMemoryAuthBackend {
    state: Arc<Mutex<BackendState>>,
}

impl InMemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn with_account(
        self,
        identifier: impl Into<String>,
        password: impl Into<String>,
        user: UserProfile,
        must_change_password: bool,
    ) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.accounts.insert(
                identifier.into(),
                Account {
                    password: password.into(),
                    user,
                    must_change_password,
                },
            );
        }
        self
    }

    /// Lifetime given to newly issued tokens.
    pub fn with_token_ttl(self, ttl: Duration) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.token_ttl = Some(ttl);
        }
        self
    }

    /// Simulate losing (or regaining) connectivity.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Invalidate every issued token.
    pub fn revoke_all(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.tokens.clear();
        }
    }

    /// Number of tokens currently accepted by `verify`.
    pub fn active_tokens(&self) -> usize {
        self.state.lock().map(|state| state.tokens.len()).unwrap_or(0)
    }

    /// Flag an account for a forced password change.
    pub fn require_password_change(&self, identifier: &str) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(account) = state.accounts.get_mut(identifier) {
                account.must_change_password = true;
            }
        }
    }

    fn reachable(&self) -> Result<MutexGuard<'_, BackendState>, AuthError> {
        let state = self
            .state
            .lock()
            .map_err(|_| AuthError::Network("backend state poisoned".to_string()))?;
        if state.offline {
            return Err(AuthError::Network("backend unreachable".to_string()));
        }
        Ok(state)
    }
}

impl AuthBackend for InMemoryAuthBackend {
    fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        let mut state = self.reachable()?;
        let account = state
            .accounts
            .get(&credentials.identifier)
            .filter(|account| account.password == credentials.password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = account.user.clone();
        let must_change_password = account.must_change_password;
        let expires_at = state.token_ttl.map(|ttl| Utc::now() + ttl);
        let token = Uuid::new_v4().simple().to_string();
        state
            .tokens
            .insert(token.clone(), credentials.identifier.clone());

        Ok(LoginGrant {
            token: AuthToken::new(token),
            user,
            must_change_password,
            expires_at,
        })
    }

    fn verify(&self, token: &AuthToken) -> Result<VerifiedToken, AuthError> {
        let state = self.reachable()?;
        let account = state
            .tokens
            .get(token.as_str())
            .and_then(|identifier| state.accounts.get(identifier))
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(VerifiedToken {
            must_change_password: account.must_change_password,
        })
    }

    fn change_password(&self, token: &AuthToken, change: &PasswordChange) -> Result<(), AuthError> {
        let mut state = self.reachable()?;
        let identifier = state
            .tokens
            .get(token.as_str())
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        let account = state
            .accounts
            .get_mut(&identifier)
            .ok_or(AuthError::InvalidCredentials)?;

        if account.password != change.current {
            return Err(AuthError::InvalidCredentials);
        }
        account.password = change.new.clone();
        account.must_change_password = false;
        Ok(())
    }

    fn revoke(&self, token: &AuthToken) -> Result<(), AuthError> {
        let mut state = self.reachable()?;
        state.tokens.remove(token.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> InMemoryAuthBackend {
        InMemoryAuthBackend::new().with_account(
            "ana",
            "temp-pass1",
            UserProfile::new("s-1", "Ana"),
            true,
        )
    }

    #[test]
    fn authenticate_issues_token() {
        let backend = backend();
        let grant = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();

        assert!(!grant.token.is_empty());
        assert!(grant.must_change_password);
        assert_eq!(grant.user.name, "Ana");
        assert!(grant.expires_at.is_none());
        assert!(backend.verify(&grant.token).is_ok());
    }

    #[test]
    fn wrong_password_is_invalid() {
        let result = backend().authenticate(&Credentials::new("ana", "nope"));
        assert_eq!(result, Err(AuthError::InvalidCredentials));

        let result = backend().authenticate(&Credentials::new("bob", "temp-pass1"));
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn offline_backend_reports_network_error() {
        let backend = backend();
        backend.set_offline(true);

        let result = backend.authenticate(&Credentials::new("ana", "temp-pass1"));
        assert!(matches!(result, Err(AuthError::Network(_))));
    }

    #[test]
    fn revoked_token_fails_verification() {
        let backend = backend();
        let grant = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();

        backend.revoke_all();
        assert_eq!(
            backend.verify(&grant.token),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn revoke_removes_only_that_token() {
        let backend = backend();
        let first = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();
        let second = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();

        backend.revoke(&first.token).unwrap();
        backend.revoke(&first.token).unwrap();

        assert_eq!(backend.active_tokens(), 1);
        assert_eq!(
            backend.verify(&first.token),
            Err(AuthError::InvalidCredentials)
        );
        assert!(backend.verify(&second.token).is_ok());
    }

    #[test]
    fn change_password_clears_flag() {
        let backend = backend();
        let grant = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();

        backend
            .change_password(
                &grant.token,
                &PasswordChange::new("temp-pass1", "grades2024", "grades2024"),
            )
            .unwrap();

        assert_eq!(
            backend.verify(&grant.token),
            Ok(VerifiedToken {
                must_change_password: false
            })
        );
        assert!(backend
            .authenticate(&Credentials::new("ana", "grades2024"))
            .is_ok());
    }

    #[test]
    fn change_password_checks_current() {
        let backend = backend();
        let grant = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();

        let result = backend.change_password(
            &grant.token,
            &PasswordChange::new("wrong", "grades2024", "grades2024"),
        );
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn token_ttl_sets_expiry() {
        let backend = backend().with_token_ttl(Duration::hours(1));
        let grant = backend
            .authenticate(&Credentials::new("ana", "temp-pass1"))
            .unwrap();
        assert!(grant.expires_at.is_some_and(|at| at > Utc::now()));
    }
}
