//! FaceLock - Key Derivation
//!
//! Derives the sealing key from the bytes of a face image:
//!
//! ```text
//! image bytes ──SHA-256──▶ 32-byte digest ──PBKDF2-HMAC-SHA256(salt, 200k)──▶ AES-256 key
//! ```
//!
//! The digest of a picture is not a secret. Anyone holding the same image
//! file derives the same key. This is a demonstration scheme and must not be
//! used where real key material is required.

use std::fmt;

use hmac::Hmac;
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{FaceLockError, FaceLockResult};

/// Key length for AES-256
pub const KEY_LEN: usize = 32;

/// Nonce length for AES-GCM
pub const NONCE_LEN: usize = 12;

/// Salt length fed to PBKDF2
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// Symmetric key derived for exactly one seal or unseal call.
///
/// Zeroized on drop and never printed.
pub struct DerivedKey {
    inner: Secret<[u8; KEY_LEN]>,
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            inner: Secret::new(bytes),
        }
    }

    /// Expose the key bytes (use with caution)
    pub fn expose(&self) -> &[u8; KEY_LEN] {
        self.inner.expose_secret()
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the sealing key for `image_bytes` under `salt`.
///
/// Identical image bytes and salt always give the identical key.
pub fn derive_key(image_bytes: &[u8], salt: &[u8; SALT_LEN]) -> FaceLockResult<DerivedKey> {
    let digest = Zeroizing::new(<[u8; 32]>::from(Sha256::digest(image_bytes)));

    let mut okm = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(&*digest, salt, PBKDF2_ITERATIONS, &mut *okm)
        .map_err(|e| FaceLockError::CryptoUnavailable(format!("PBKDF2: {}", e)))?;

    Ok(DerivedKey::new(*okm))
}

/// Fill a fixed-size buffer from the OS random source
fn random_array<const N: usize>() -> FaceLockResult<[u8; N]> {
    let mut out = [0u8; N];
    OsRng
        .try_fill_bytes(&mut out)
        .map_err(|e| FaceLockError::CryptoUnavailable(format!("RNG failed: {}", e)))?;
    Ok(out)
}

/// Generate a fresh salt for one sealing operation
pub fn generate_salt() -> FaceLockResult<[u8; SALT_LEN]> {
    random_array()
}

/// Generate a fresh AES-GCM nonce
pub fn generate_nonce() -> FaceLockResult<[u8; NONCE_LEN]> {
    random_array()
}
