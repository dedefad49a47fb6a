//! Face-keyed sealing pipeline
//!
//! ```text
//! seal:   salt ← RNG, key ← derive(face, salt), (iv, ct) ← AES-GCM(key, payload)
//!         container ← FLOCKv1 ‖ len ‖ {iv, salt, info} ‖ ct
//! unseal: magic + metadata parsed first, then key ← derive(face, salt), payload ← open(ct)
//! ```
//!
//! Keys live only for the duration of one call.

use chrono::Utc;
use log::{debug, info};

use crate::container::{self, SealMetadata, DEFAULT_MIME};
use crate::crypto::{self, derive_key, generate_salt, ALGORITHM};
use crate::error::FaceLockResult;

/// Extension given to sealed files
pub const SEALED_EXTENSION: &str = "facelock";

/// Caller-declared description of the payload being sealed
#[derive(Debug, Clone, Default)]
pub struct PayloadInfo {
    /// MIME type, empty for unknown
    pub mime: String,
    /// Original file name
    pub name: String,
}

impl PayloadInfo {
    /// Describe a payload by name and MIME type
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}

/// Result of a successful unseal
#[derive(Debug, Clone)]
pub struct Unsealed {
    /// Metadata read from the container (untrusted, informational)
    pub metadata: SealMetadata,
    /// Recovered payload
    pub plaintext: Vec<u8>,
}

impl Unsealed {
    /// Suggested file name for the recovered payload
    pub fn output_name(&self) -> String {
        unlocked_file_name(&self.metadata.original_name)
    }
}

/// Seal `plaintext` under a key derived from `face_bytes`
pub fn seal_payload(face_bytes: &[u8], plaintext: &[u8], payload: &PayloadInfo) -> FaceLockResult<Vec<u8>> {
    debug!("Deriving key from face ({} bytes)", face_bytes.len());
    let salt = generate_salt()?;
    let key = derive_key(face_bytes, &salt)?;

    debug!("Encrypting {} bytes", plaintext.len());
    let sealed = crypto::seal(&key, plaintext)?;
    drop(key);

    let mime = if payload.mime.is_empty() {
        DEFAULT_MIME.to_string()
    } else {
        payload.mime.clone()
    };

    let metadata = SealMetadata {
        mime,
        original_name: payload.name.clone(),
        original_size: plaintext.len() as u64,
        timestamp: Utc::now().timestamp_millis(),
        ..SealMetadata::with_crypto_params(ALGORITHM, &sealed.nonce, &salt)
    };

    let out = container::encode(&metadata, &sealed.ciphertext)?;
    info!("Sealed {:?} into {} byte container", metadata.original_name, out.len());
    Ok(out)
}

/// Recover the payload of a container using the same face image.
///
/// Container framing is checked before any key derivation runs.
pub fn unseal_payload(face_bytes: &[u8], container_bytes: &[u8]) -> FaceLockResult<Unsealed> {
    debug!("Parsing container ({} bytes)", container_bytes.len());
    let (metadata, ciphertext) = container::decode(container_bytes)?;
    let nonce = metadata.nonce()?;
    let salt = metadata.salt()?;

    debug!("Deriving key from face ({} bytes)", face_bytes.len());
    let key = derive_key(face_bytes, &salt)?;
    let plaintext = crypto::unseal(&key, &nonce, ciphertext)?;

    info!("Unsealed {} bytes", plaintext.len());
    Ok(Unsealed { metadata, plaintext })
}

/// `report.pdf` → `report.pdf.facelock`
pub fn sealed_file_name(original_name: &str) -> String {
    format!("{}.{}", original_name, SEALED_EXTENSION)
}

/// `report.pdf` → `unlocked_report.pdf`, empty → `unlocked`
pub fn unlocked_file_name(original_name: &str) -> String {
    if original_name.is_empty() {
        "unlocked".into()
    } else {
        format!("unlocked_{}", original_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
