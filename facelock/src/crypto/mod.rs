//! FaceLock - Cryptographic Core
//!
//! Face-derived key material and AES-256-GCM sealing.

pub mod keys;
pub mod aead;

pub use keys::*;
pub use aead::{seal, unseal, SealedPayload, ALGORITHM, TAG_LEN};
