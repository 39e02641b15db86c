//! Persisted credentials.
//!
//! The session provider reads the store once at startup and writes it on
//! login, password change and logout. Records carry a format version and
//! can be encoded as JSON or as compact binary.

use crate::session::{AuthToken, LoginGrant, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;
mod file;
mod memory;

pub use error::{CodecError, StoreError};
pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;

/// Version identifier for the credential record format
pub const CREDENTIALS_VERSION: u32 = 1;

/// Key-value style store holding at most one credential record.
pub trait CredentialStore {
    /// Read the record, `None` when nothing is stored.
    fn load(&self) -> Result<Option<StoredCredentials>, StoreError>;

    fn save(&self, record: &StoredCredentials) -> Result<(), StoreError>;

    /// Remove the record. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Credential record written after a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Record format version
    pub version: u32,

    /// Identifier of this login, used to correlate log lines
    pub session_id: Uuid,

    pub token: AuthToken,

    pub user: UserProfile,

    pub must_change_password: bool,

    /// When the login happened
    pub issued_at: DateTime<Utc>,

    /// When the token stops being valid, if the backend said so
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredCredentials {
    /// Build a record for a fresh login.
    pub fn from_grant(grant: LoginGrant, issued_at: DateTime<Utc>) -> Self {
        Self {
            version: CREDENTIALS_VERSION,
            session_id: Uuid::new_v4(),
            token: grant.token,
            user: grant.user,
            must_change_password: grant.must_change_password,
            issued_at,
            expires_at: grant.expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(|e| CodecError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let record: Self = serde_json::from_str(json)
            .map_err(|e| CodecError::DeserializationFailed(e.to_string()))?;
        record.validate()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(self).map_err(|e| CodecError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CodecError> {
        let record: Self = bincode::deserialize(bytes)
            .map_err(|e| CodecError::DeserializationFailed(e.to_string()))?;
        record.validate()
    }

    fn validate(self) -> Result<Self, CodecError> {
        if self.version != CREDENTIALS_VERSION {
            return Err(CodecError::UnsupportedVersion {
                found: self.version,
                supported: CREDENTIALS_VERSION,
            });
        }
        if self.token.is_empty() {
            return Err(CodecError::ValidationFailed("empty token".to_string()));
        }
        if self
            .expires_at
            .is_some_and(|expires_at| expires_at < self.issued_at)
        {
            return Err(CodecError::ValidationFailed(
                "expiry precedes issue time".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;

    pub(crate) fn sample_record() -> StoredCredentials {
        StoredCredentials::from_grant(
            LoginGrant {
                token: AuthToken::new("token-1"),
                user: UserProfile::new("s-1", "Ana").with_email("ana@school.test"),
                must_change_password: true,
                expires_at: Some(Utc::now() + Duration::days(7)),
            },
            Utc::now(),
        )
    }

    #[test]
    fn from_grant_stamps_version_and_session() {
        let a = sample_record();
        let b = sample_record();
        assert_eq!(a.version, CREDENTIALS_VERSION);
        assert_ne!(a.session_id, b.session_id);
        assert!(a.must_change_password);
    }

    #[test]
    fn json_and_binary_decode_to_the_same_record() {
        let record = sample_record();

        let from_json = StoredCredentials::from_json(&record.to_json().unwrap()).unwrap();
        let from_binary = StoredCredentials::from_binary(&record.to_binary().unwrap()).unwrap();

        assert_eq!(from_json, record);
        assert_eq!(from_binary, record);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut record = sample_record();
        record.version = 7;
        let bytes = record.to_binary().unwrap();

        assert_eq!(
            StoredCredentials::from_binary(&bytes),
            Err(CodecError::UnsupportedVersion {
                found: 7,
                supported: CREDENTIALS_VERSION
            })
        );
    }

    #[test]
    fn inconsistent_records_fail_validation() {
        let mut record = sample_record();
        record.expires_at = Some(record.issued_at - Duration::seconds(1));
        let json = record.to_json().unwrap();
        assert!(matches!(
            StoredCredentials::from_json(&json),
            Err(CodecError::ValidationFailed(_))
        ));

        let mut record = sample_record();
        record.token = AuthToken::new("");
        let json = record.to_json().unwrap();
        assert!(matches!(
            StoredCredentials::from_json(&json),
            Err(CodecError::ValidationFailed(_))
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            StoredCredentials::from_binary(&[1, 2, 3]),
            Err(CodecError::DeserializationFailed(_))
        ));
        assert!(matches!(
            StoredCredentials::from_json("{"),
            Err(CodecError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn expiry() {
        let mut record = sample_record();
        let now = Utc::now();
        assert!(!record.is_expired_at(now));

        record.expires_at = Some(now);
        assert!(record.is_expired_at(now));

        record.expires_at = None;
        assert!(!record.is_expired_at(now + Duration::days(3650)));
    }
}
