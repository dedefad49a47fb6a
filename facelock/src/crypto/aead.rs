//! FaceLock - AEAD Encryption
//!
//! AES-256-GCM with a fresh random 96-bit nonce per call and no associated
//! data. Ciphertext is the encrypted payload followed by the 16-byte tag.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use super::keys::{generate_nonce, DerivedKey, NONCE_LEN};
use crate::error::{FaceLockError, FaceLockResult};

/// GCM authentication tag size
pub const TAG_LEN: usize = 16;

/// Identifier written into container metadata
pub const ALGORITHM: &str = "AES-GCM";

/// Output of one sealing call
#[derive(Debug, Clone)]
pub struct SealedPayload {
    /// Nonce used for this call, never reused
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with authentication tag appended
    pub ciphertext: Vec<u8>,
}

/// Encrypt `plaintext` under `key` with a freshly generated nonce
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> FaceLockResult<SealedPayload> {
    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|e| FaceLockError::CryptoUnavailable(e.to_string()))?;

    let nonce_bytes = generate_nonce()?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| FaceLockError::CryptoUnavailable(format!("AES-GCM: {}", e)))?;

    Ok(SealedPayload {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Verify and decrypt.
///
/// Wrong key, wrong face, truncation and tampering all surface as
/// [`FaceLockError::AuthenticationFailed`].
pub fn unseal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> FaceLockResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.expose())
        .map_err(|e| FaceLockError::CryptoUnavailable(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| FaceLockError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_LEN;

    #[test]
    fn test_aes_gcm_roundtrip() {
        let key = DerivedKey::new([0x42; KEY_LEN]);
        let plaintext = b"FaceLock - sealed document body";

        let sealed = seal(&key, plaintext).unwrap();
        assert_eq!(sealed.ciphertext.len(), plaintext.len() + TAG_LEN);

        let opened = unseal(&key, &sealed.nonce, &sealed.ciphertext).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = DerivedKey::new([1; KEY_LEN]);
        let sealed = seal(&key, b"").unwrap();
        assert_eq!(sealed.ciphertext.len(), TAG_LEN);
        assert!(unseal(&key, &sealed.nonce, &sealed.ciphertext).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = DerivedKey::new([1; KEY_LEN]);
        let key2 = DerivedKey::new([2; KEY_LEN]);

        let sealed = seal(&key1, b"Secret data").unwrap();
        let result = unseal(&key2, &sealed.nonce, &sealed.ciphertext);

        assert!(matches!(result, Err(FaceLockError::AuthenticationFailed)));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = DerivedKey::new([3; KEY_LEN]);
        let sealed = seal(&key, b"Secret data").unwrap();

        let short = &sealed.ciphertext[..TAG_LEN - 1];
        assert!(matches!(
            unseal(&key, &sealed.nonce, short),
            Err(FaceLockError::AuthenticationFailed)
        ));
    }
}
