//! FaceLock container format
//!
//! Container layout (`.facelock`):
//! ```text
//! [MAGIC 8B]["FLOCKv1\n"]
//! [META_LEN 4B][big-endian u32]
//! [META variable][UTF-8 JSON, see SealMetadata]
//! [CIPHERTEXT variable][AES-256-GCM output, tag at the end]
//! ```
//!
//! Metadata travels in the clear. Only `ivHex` and `saltHex` feed the
//! crypto; the other fields are informational.

use serde::{Deserialize, Serialize};

use crate::codec::{bytes_to_hex, concat, hex_to_array};
use crate::crypto::{NONCE_LEN, SALT_LEN};
use crate::error::{FaceLockError, FaceLockResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes identifying a FaceLock container
pub const MAGIC: &[u8; 8] = b"FLOCKv1\n";

/// Current metadata version
pub const FORMAT_VERSION: u32 = 1;

/// Size of the metadata length prefix
const LEN_SIZE: usize = 4;

/// MAGIC(8) + META_LEN(4)
pub const HEADER_SIZE: usize = MAGIC.len() + LEN_SIZE;

/// Note written into every container
pub const DEFAULT_NOTE: &str = "FaceLock demo container.";

/// MIME type used when the caller does not know one
pub const DEFAULT_MIME: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Descriptive record stored in front of the ciphertext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealMetadata {
    /// Format tag, 1 for this layout
    pub version: u32,
    /// AEAD scheme name
    #[serde(rename = "algo")]
    pub algorithm: String,
    /// Hex nonce (12 bytes)
    #[serde(rename = "ivHex")]
    pub iv_hex: String,
    /// Hex PBKDF2 salt (16 bytes)
    #[serde(rename = "saltHex")]
    pub salt_hex: String,
    /// Declared MIME type of the payload
    pub mime: String,
    /// Original file name
    #[serde(rename = "name")]
    pub original_name: String,
    /// Original payload size in bytes
    #[serde(rename = "size")]
    pub original_size: u64,
    /// Creation time, epoch milliseconds
    #[serde(rename = "ts")]
    pub timestamp: i64,
    /// Free-form note
    #[serde(default)]
    pub note: String,
}

impl SealMetadata {
    /// Decode `ivHex`, requiring exactly one AES-GCM nonce
    pub fn nonce(&self) -> FaceLockResult<[u8; NONCE_LEN]> {
        hex_to_array(&self.iv_hex)
    }

    /// Decode `saltHex`, requiring exactly one PBKDF2 salt
    pub fn salt(&self) -> FaceLockResult<[u8; SALT_LEN]> {
        hex_to_array(&self.salt_hex)
    }

    /// Hex-encode nonce and salt into a fresh record
    pub fn with_crypto_params(
        algorithm: &str,
        nonce: &[u8; NONCE_LEN],
        salt: &[u8; SALT_LEN],
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            algorithm: algorithm.into(),
            iv_hex: bytes_to_hex(nonce),
            salt_hex: bytes_to_hex(salt),
            mime: DEFAULT_MIME.into(),
            original_name: String::new(),
            original_size: 0,
            timestamp: 0,
            note: DEFAULT_NOTE.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Serialize metadata and ciphertext into one container buffer
pub fn encode(metadata: &SealMetadata, ciphertext: &[u8]) -> FaceLockResult<Vec<u8>> {
    let meta = serde_json::to_vec(metadata)?;
    let meta_len = u32::try_from(meta.len())
        .map_err(|_| FaceLockError::MalformedMetadata("metadata exceeds 4 GiB".into()))?;

    Ok(concat(&[&MAGIC[..], &meta_len.to_be_bytes()[..], &meta[..], ciphertext]))
}

/// Parse a container into its metadata and a view of the ciphertext.
///
/// The magic is checked before anything else is read. Ciphertext length is
/// not validated here; a short or corrupt ciphertext fails authentication.
pub fn decode(data: &[u8]) -> FaceLockResult<(SealMetadata, &[u8])> {
    if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
        return Err(FaceLockError::MalformedContainer);
    }

    let len_bytes: [u8; LEN_SIZE] = data
        .get(MAGIC.len()..HEADER_SIZE)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| FaceLockError::MalformedMetadata("missing metadata length".into()))?;
    let meta_len = u32::from_be_bytes(len_bytes) as usize;

    let meta_end = HEADER_SIZE
        .checked_add(meta_len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            FaceLockError::MalformedMetadata(format!(
                "metadata length {} exceeds container ({} bytes)",
                meta_len,
                data.len()
            ))
        })?;

    let metadata: SealMetadata = serde_json::from_slice(&data[HEADER_SIZE..meta_end])
        .map_err(|e| FaceLockError::MalformedMetadata(e.to_string()))?;

    Ok((metadata, &data[meta_end..]))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
