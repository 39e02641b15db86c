//! Session value, its enumerated phase and the events that move it.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Authentication and password-change status of the current user.
///
/// `must_change_password` only means something for an authenticated
/// session; the constructors never produce an unauthenticated session that
/// carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    is_authenticated: bool,
    must_change_password: bool,
    is_loading: bool,
}

impl Session {
    /// State at process start: unauthenticated, persisted credentials not
    /// yet checked.
    pub const fn initial() -> Self {
        Self {
            is_authenticated: false,
            must_change_password: false,
            is_loading: true,
        }
    }

    /// Resolved and unauthenticated.
    pub const fn signed_out() -> Self {
        Self {
            is_authenticated: false,
            must_change_password: false,
            is_loading: false,
        }
    }

    /// Resolved and authenticated.
    pub const fn signed_in(must_change_password: bool) -> Self {
        Self {
            is_authenticated: true,
            must_change_password,
            is_loading: false,
        }
    }

    /// Build a session from raw flags. `must_change_password` is dropped
    /// when the session is not authenticated.
    pub const fn from_flags(is_authenticated: bool, must_change_password: bool, is_loading: bool) -> Self {
        Self {
            is_authenticated,
            must_change_password: is_authenticated && must_change_password,
            is_loading,
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub const fn must_change_password(&self) -> bool {
        self.must_change_password
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_loading, self.is_authenticated, self.must_change_password) {
            (true, _, _) => SessionPhase::Loading,
            (false, false, _) => SessionPhase::SignedOut,
            (false, true, true) => SessionPhase::PasswordChangeRequired,
            (false, true, false) => SessionPhase::SignedIn,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Enumerated view of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    Loading,
    SignedOut,
    PasswordChangeRequired,
    SignedIn,
}

impl State for SessionPhase {
    fn name(&self) -> &str {
        match self {
            Self::Loading => "Loading",
            Self::SignedOut => "SignedOut",
            Self::PasswordChangeRequired => "PasswordChangeRequired",
            Self::SignedIn => "SignedIn",
        }
    }

    fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Cause of a session change, recorded in the provider's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Persisted credentials were found and accepted at startup.
    Restored,
    /// Startup finished without a usable persisted session.
    StartedSignedOut,
    SignedIn,
    PasswordChanged,
    /// The backend re-check changed the password flag.
    Revalidated,
    SignedOut,
    /// The backend no longer accepts the session token.
    Revoked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_session_is_loading_and_signed_out() {
        let session = Session::initial();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(!session.must_change_password());
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert_eq!(Session::default(), session);
    }

    #[test]
    fn phases() {
        assert_eq!(Session::signed_out().phase(), SessionPhase::SignedOut);
        assert_eq!(Session::signed_in(false).phase(), SessionPhase::SignedIn);
        assert_eq!(
            Session::signed_in(true).phase(),
            SessionPhase::PasswordChangeRequired
        );
        assert_eq!(
            Session::from_flags(true, true, true).phase(),
            SessionPhase::Loading
        );
    }

    #[test]
    fn password_flag_requires_authentication() {
        let session = Session::from_flags(false, true, false);
        assert!(!session.must_change_password());
        assert_eq!(session, Session::signed_out());
    }

    #[test]
    fn only_loading_is_unsettled() {
        assert!(!SessionPhase::Loading.is_settled());
        assert!(SessionPhase::SignedOut.is_settled());
        assert!(SessionPhase::PasswordChangeRequired.is_settled());
        assert!(SessionPhase::SignedIn.is_settled());
    }
}
