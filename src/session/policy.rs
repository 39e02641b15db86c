//! Client-side credential checks.
//!
//! Checks use Stillwater's `Validation` so that every problem with an input
//! is reported in one pass instead of stopping at the first.

use super::credentials::{Credentials, PasswordChange};
use super::error::AuthError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Outcome of a credential check.
pub type PolicyCheck = Validation<(), NonEmptyVec<CredentialViolation>>;

/// A single problem found in user-supplied credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialViolation {
    #[error("Identifier is empty")]
    EmptyIdentifier,

    #[error("Password is empty")]
    EmptyPassword,

    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain a letter")]
    MissingLetter,

    #[error("Password must contain a digit")]
    MissingDigit,

    #[error("New password must differ from the current password")]
    Unchanged,

    #[error("Password confirmation does not match")]
    ConfirmationMismatch,
}

fn require(ok: bool, violation: CredentialViolation) -> PolicyCheck {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

/// Check login input before it is sent anywhere.
pub fn check_credentials(credentials: &Credentials) -> PolicyCheck {
    let checks = vec![
        require(
            !credentials.identifier.trim().is_empty(),
            CredentialViolation::EmptyIdentifier,
        ),
        require(
            !credentials.password.is_empty(),
            CredentialViolation::EmptyPassword,
        ),
    ];
    Validation::all_vec(checks).map(|_| ())
}

/// Rules a new password must satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_letter: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_letter: true,
            require_digit: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a password change request, accumulating every violation.
    pub fn check(&self, change: &PasswordChange) -> PolicyCheck {
        let new = change.new.as_str();
        let length = new.chars().count();

        let mut checks = vec![
            require(
                length >= self.min_length,
                CredentialViolation::TooShort {
                    min: self.min_length,
                    actual: length,
                },
            ),
            require(new != change.current, CredentialViolation::Unchanged),
            require(
                new == change.confirmation,
                CredentialViolation::ConfirmationMismatch,
            ),
        ];

        if self.require_letter {
            checks.push(require(
                new.chars().any(char::is_alphabetic),
                CredentialViolation::MissingLetter,
            ));
        }
        if self.require_digit {
            checks.push(require(
                new.chars().any(|c| c.is_ascii_digit()),
                CredentialViolation::MissingDigit,
            ));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Convert a failed check into [`AuthError::Rejected`].
pub fn into_auth_result(check: PolicyCheck) -> Result<(), AuthError> {
    match check {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => Err(AuthError::Rejected(
            violations.iter().cloned().collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(check: PolicyCheck) -> Vec<CredentialViolation> {
        match into_auth_result(check) {
            Ok(()) => Vec::new(),
            Err(AuthError::Rejected(violations)) => violations,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_credentials_pass() {
        let check = check_credentials(&Credentials::new("ana", "secret"));
        assert!(check.is_success());
    }

    #[test]
    fn empty_credentials_report_both_problems() {
        let found = violations(check_credentials(&Credentials::new("   ", "")));
        assert_eq!(
            found,
            vec![
                CredentialViolation::EmptyIdentifier,
                CredentialViolation::EmptyPassword
            ]
        );
    }

    #[test]
    fn policy_accepts_good_password() {
        let policy = PasswordPolicy::default();
        let change = PasswordChange::new("temporary1", "grades2024", "grades2024");
        assert!(policy.check(&change).is_success());
    }

    #[test]
    fn policy_accumulates_every_violation() {
        let policy = PasswordPolicy::default();
        let change = PasswordChange::new("abc", "abc", "abd");

        let found = violations(policy.check(&change));

        assert_eq!(found.len(), 4);
        assert!(found.contains(&CredentialViolation::TooShort { min: 8, actual: 3 }));
        assert!(found.contains(&CredentialViolation::Unchanged));
        assert!(found.contains(&CredentialViolation::ConfirmationMismatch));
        assert!(found.contains(&CredentialViolation::MissingDigit));
    }

    #[test]
    fn character_class_rules_can_be_disabled() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_letter: false,
            require_digit: false,
        };
        let change = PasswordChange::new("old-pass", "----", "----");
        assert!(policy.check(&change).is_success());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let policy = PasswordPolicy {
            min_length: 4,
            require_letter: false,
            require_digit: false,
        };
        let change = PasswordChange::new("old", "ñññ", "ñññ");
        let found = violations(policy.check(&change));
        assert_eq!(found, vec![CredentialViolation::TooShort { min: 4, actual: 3 }]);
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: PasswordPolicy = serde_json::from_str(r#"{ "min_length": 12 }"#).unwrap();
        assert_eq!(policy.min_length, 12);
        assert!(policy.require_digit);
    }
}
