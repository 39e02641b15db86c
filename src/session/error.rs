//! Session error types.

use super::policy::CredentialViolation;
use thiserror::Error;

/// Errors reported by session operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The backend refused the identifier/password pair or the token.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The backend could not be reached. Existing sessions are kept.
    #[error("Network error: {0}")]
    Network(String),

    /// Input failed client-side checks; nothing was sent.
    #[error("Credentials rejected: {0:?}")]
    Rejected(Vec<CredentialViolation>),

    /// Persisted credentials have not been checked yet.
    #[error("Session is still loading")]
    SessionLoading,

    #[error("No authenticated session")]
    NotAuthenticated,
}
