//! # FaceLock
//!
//! Face-keyed file sealing and perceptual-hash sign-in.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         FACELOCK                          │
//! │                                                           │
//! │   face image ─┬─▶ SHA-256 ─▶ PBKDF2 ─▶ AES-256-GCM ─┐     │
//! │               │                                      ▼     │
//! │               │                          FLOCKv1 container │
//! │               │                                            │
//! │               └─▶ 16×16 luminance grid ─▶ 256-bit hash     │
//! │                                   │                        │
//! │          enrolled hash ──▶ Hamming distance ≤ threshold    │
//! │          liveness done ──▶            AND        ─▶ verdict │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! This is a demonstration, not a biometric authentication system.
//!
//! - The sealing key is derived from the SHA-256 of the image file. Anyone
//!   holding the same file can unseal. A real deployment needs a genuine
//!   secret or a proof-of-possession factor.
//! - The perceptual hash tolerates small visual changes and resists nothing.
//! - A completed liveness challenge is not bound to an enrollment or to a
//!   specific match attempt.
//! - AES-GCM nonces and PBKDF2 salts are fresh per seal; keys are zeroized
//!   after each call.

pub mod api;
pub mod codec;
pub mod config;
pub mod container;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod phash;
pub mod seal;
pub mod session;
pub mod store;

pub use api::FaceLock;
pub use config::FaceLockConfig;
pub use error::{FaceLockError, FaceLockResult};
pub use matcher::{decide, hamming_distance, Decision, MatchOutcome};
pub use phash::{compute_hash, HashEngine, PerceptualHash};
pub use seal::{seal_payload, unseal_payload, PayloadInfo, Unsealed};
pub use session::EnrollmentState;

/// FaceLock version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
