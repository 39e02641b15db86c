//! Session state provider and everything it talks to.
//!
//! The provider is the imperative shell around the session value: it runs
//! backend and store effects against an environment, then applies the
//! outcome to a plain [`Session`] and tells its observers.

mod backend;
mod credentials;
mod effects;
mod error;
mod policy;
mod provider;
mod state;

pub use backend::{AuthBackend, InMemoryAuthBackend};
pub use credentials::{AuthToken, Credentials, LoginGrant, PasswordChange, UserProfile, VerifiedToken};
pub use error::AuthError;
pub use policy::{check_credentials, into_auth_result, CredentialViolation, PasswordPolicy, PolicyCheck};
pub use provider::{SessionObserver, SessionProvider, SubscriptionId, DEFAULT_HISTORY_LIMIT};
pub use state::{Session, SessionEvent, SessionPhase};

use crate::store::{CredentialStore, StoreError, StoredCredentials};

/// Everything the provider needs from the outside world.
pub trait SessionEnv: AuthBackend + CredentialStore + Clone + Send + Sync + 'static {}

impl<T> SessionEnv for T where T: AuthBackend + CredentialStore + Clone + Send + Sync + 'static {}

/// An auth backend and a credential store bundled into one environment.
#[derive(Clone, Debug)]
pub struct Environment<B, S> {
    pub backend: B,
    pub store: S,
}

impl<B, S> Environment<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self { backend, store }
    }
}

impl<B: AuthBackend, S> AuthBackend for Environment<B, S> {
    fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant, AuthError> {
        self.backend.authenticate(credentials)
    }

    fn verify(&self, token: &AuthToken) -> Result<VerifiedToken, AuthError> {
        self.backend.verify(token)
    }

    fn change_password(&self, token: &AuthToken, change: &PasswordChange) -> Result<(), AuthError> {
        self.backend.change_password(token, change)
    }

    fn revoke(&self, token: &AuthToken) -> Result<(), AuthError> {
        self.backend.revoke(token)
    }
}

impl<B, S: CredentialStore> CredentialStore for Environment<B, S> {
    fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        self.store.load()
    }

    fn save(&self, record: &StoredCredentials) -> Result<(), StoreError> {
        self.store.save(record)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()
    }
}
