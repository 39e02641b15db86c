//! Credential store error types.

use thiserror::Error;

/// Errors encoding or decoding a persisted credential record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Record was written by an unsupported format version
    #[error("Unsupported credentials version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Record decoded but its contents are inconsistent
    #[error("Credentials validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors reading or writing the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Shared store state is unusable (a writer panicked)
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}
