//! FaceLock - Error Types

use thiserror::Error;

/// Result type for FaceLock operations
pub type FaceLockResult<T> = Result<T, FaceLockError>;

/// Generic text shown to users when unsealing fails
pub const UNSEAL_FAILED_MESSAGE: &str = "decryption failed — try the same enrolled image";

/// Generic text shown to users when a sign-in attempt fails
pub const SIGNIN_FAILED_MESSAGE: &str = "sign-in denied";

/// FaceLock error types
#[derive(Error, Debug)]
pub enum FaceLockError {
    // ═══════════════════════════════════════════════════════════════
    // CONTAINER ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid container (magic)")]
    MalformedContainer,

    #[error("Malformed container metadata: {0}")]
    MalformedMetadata(String),

    // ═══════════════════════════════════════════════════════════════
    // CRYPTO ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Authentication failed - wrong face image or corrupted data")]
    AuthenticationFailed,

    #[error("Cryptographic primitive unavailable: {0}")]
    CryptoUnavailable(String),

    // ═══════════════════════════════════════════════════════════════
    // MATCHING ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("No enrolled face - enroll first")]
    NotEnrolled,

    #[error("No active liveness challenge")]
    NoActiveChallenge,

    #[error("Hashes are not comparable: {left} bits vs {right} bits")]
    IncomparableHashes { left: usize, right: usize },

    #[error("Invalid perceptual hash: {0}")]
    InvalidHash(String),

    #[error("Image processing error: {0}")]
    ImageDecode(String),

    // ═══════════════════════════════════════════════════════════════
    // CONFIG / IO ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FaceLockError {
    /// Check if this error came out of an authentication check
    /// (AEAD tag, enrollment, liveness or hash comparison).
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            FaceLockError::AuthenticationFailed
                | FaceLockError::NotEnrolled
                | FaceLockError::NoActiveChallenge
                | FaceLockError::IncomparableHashes { .. }
        )
    }

    /// Check if retrying with the same inputs can ever succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, FaceLockError::Io(_))
    }

    /// Text safe to show to an end user.
    ///
    /// Unseal and sign-in failures collapse to one generic message each so
    /// the caller cannot tell which check rejected the attempt.
    pub fn user_message(&self) -> String {
        match self {
            FaceLockError::MalformedContainer
            | FaceLockError::MalformedMetadata(_)
            | FaceLockError::AuthenticationFailed => UNSEAL_FAILED_MESSAGE.into(),
            FaceLockError::NotEnrolled
            | FaceLockError::NoActiveChallenge
            | FaceLockError::IncomparableHashes { .. } => SIGNIN_FAILED_MESSAGE.into(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FaceLockError {
    fn from(e: serde_json::Error) -> Self {
        FaceLockError::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for FaceLockError {
    fn from(e: image::ImageError) -> Self {
        FaceLockError::ImageDecode(e.to_string())
    }
}
