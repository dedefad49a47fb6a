//! FaceLock - Unified Public API
//!
//! Single entry point for sealing, unsealing, enrollment and sign-in.

use log::{info, warn};
use rand::seq::SliceRandom;

use crate::config::FaceLockConfig;
use crate::error::{FaceLockError, FaceLockResult};
use crate::matcher::MatchOutcome;
use crate::phash::{HashEngine, PerceptualHash};
use crate::seal::{seal_payload, unseal_payload, PayloadInfo, Unsealed};
use crate::session::EnrollmentState;
use crate::store::{FileHashStore, HashStore};

// ═══════════════════════════════════════════════════════════════════════════════
// FACELOCK API - THE ONLY PUBLIC INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// FaceLock API
///
/// Owns one session. Every method takes `&mut self` or `&self`; callers that
/// share an instance across threads must wrap it in their own lock.
///
/// # Example
///
/// ```rust,ignore
/// use facelock::api::FaceLock;
/// use facelock::seal::PayloadInfo;
///
/// let mut lock = FaceLock::new(Default::default())?;
///
/// // Seal a document with a selfie
/// let sealed = lock.seal(&selfie, &document, &PayloadInfo::new("doc.pdf", "application/pdf"))?;
/// let opened = lock.unseal(&selfie, &sealed)?;
///
/// // Sign in
/// lock.enroll(&selfie)?;
/// println!("Do this: {}", lock.issue_challenge());
/// lock.complete_challenge()?;
/// let outcome = lock.attempt_match(&fresh_capture)?;
/// ```
pub struct FaceLock {
    /// Configuration
    config: FaceLockConfig,
    /// Perceptual hasher
    engine: HashEngine,
    /// Enrollment and liveness state
    state: EnrollmentState,
    /// Optional enrolled-hash cache
    store: Option<Box<dyn HashStore>>,
}

impl FaceLock {
    // ═══════════════════════════════════════════════════════════════════════
    // INITIALIZATION
    // ═══════════════════════════════════════════════════════════════════════

    /// Create from config, opening `store_path` when one is set
    pub fn new(config: FaceLockConfig) -> FaceLockResult<Self> {
        let store = config
            .store_path
            .as_ref()
            .map(|path| Box::new(FileHashStore::new(path)) as Box<dyn HashStore>);
        Self::with_store(config, store)
    }

    /// Create with an explicit store (or none for memory-only enrollment)
    pub fn with_store(config: FaceLockConfig, store: Option<Box<dyn HashStore>>) -> FaceLockResult<Self> {
        config.validate()?;
        let engine = HashEngine::new(config.grid_size)?;

        let mut lock = Self {
            config,
            engine,
            state: EnrollmentState::new(),
            store,
        };
        lock.load_cached_enrollment()?;
        Ok(lock)
    }

    fn load_cached_enrollment(&mut self) -> FaceLockResult<()> {
        let Some(store) = self.store.as_ref() else {
            return Ok(());
        };
        if let Some(hex) = store.load()? {
            match PerceptualHash::from_hex(&hex) {
                Ok(hash) => {
                    info!("Face enrolled (cached): {}", hash.preview());
                    self.state.enroll(hash);
                }
                Err(e) => warn!("Ignoring unreadable cached hash: {}", e),
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SEALING
    // ═══════════════════════════════════════════════════════════════════════

    /// Seal `plaintext` with a key derived from `face_bytes`
    pub fn seal(&self, face_bytes: &[u8], plaintext: &[u8], payload: &PayloadInfo) -> FaceLockResult<Vec<u8>> {
        seal_payload(face_bytes, plaintext, payload)
    }

    /// Open a container with the same face image used to seal it
    pub fn unseal(&self, face_bytes: &[u8], container: &[u8]) -> FaceLockResult<Unsealed> {
        unseal_payload(face_bytes, container)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ENROLLMENT & SIGN-IN
    // ═══════════════════════════════════════════════════════════════════════

    /// Hash `image_bytes` without touching the session
    pub fn compute_hash(&self, image_bytes: &[u8]) -> FaceLockResult<PerceptualHash> {
        self.engine.hash_bytes(image_bytes)
    }

    /// Enroll a face image, returning its hash hex
    pub fn enroll(&mut self, image_bytes: &[u8]) -> FaceLockResult<String> {
        let hash = self.compute_hash(image_bytes)?;
        self.enroll_hash(hash)
    }

    /// Enroll an already computed hash
    pub fn enroll_hash(&mut self, hash: PerceptualHash) -> FaceLockResult<String> {
        let hex = hash.to_hex();
        self.state.enroll(hash);
        if self.config.persist_enrollment {
            if let Some(store) = self.store.as_mut() {
                store.save(&hex)?;
            }
        }
        info!("Face enrolled ({} bits)", hex.len() * 4);
        Ok(hex)
    }

    /// Pick a random prompt and make it the active challenge
    pub fn issue_challenge(&mut self) -> String {
        let prompts: Vec<&String> = self
            .config
            .prompts
            .iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        let prompt = prompts
            .choose(&mut rand::thread_rng())
            .map(|p| p.to_string())
            .unwrap_or_default();
        self.state.issue_challenge(prompt).prompt.clone()
    }

    /// Confirm the user performed the active challenge
    pub fn complete_challenge(&mut self) -> FaceLockResult<()> {
        self.state.complete_challenge()
    }

    /// Compare a fresh capture with the enrolled face
    pub fn attempt_match(&self, image_bytes: &[u8]) -> FaceLockResult<MatchOutcome> {
        if !self.state.is_enrolled() {
            return Err(FaceLockError::NotEnrolled);
        }
        let probe = self.compute_hash(image_bytes)?;
        self.attempt_match_hash(&probe)
    }

    /// Compare an already computed probe hash with the enrolled face
    pub fn attempt_match_hash(&self, probe: &PerceptualHash) -> FaceLockResult<MatchOutcome> {
        let outcome = self.state.attempt_match(probe, self.config.threshold)?;
        if outcome.accepted {
            info!("Match (distance {})", outcome.distance);
        } else {
            info!("Denied (distance {})", outcome.distance);
        }
        Ok(outcome)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SETTINGS
    // ═══════════════════════════════════════════════════════════════════════

    /// Change the accepted distance
    pub fn set_threshold(&mut self, threshold: u32) {
        self.config.threshold = threshold;
    }

    /// Toggle persistence of the enrolled hash.
    ///
    /// Enabling writes the current enrollment to the store; disabling
    /// removes the stored copy but keeps the in-memory enrollment.
    pub fn set_persist_enrollment(&mut self, persist: bool) -> FaceLockResult<()> {
        self.config.persist_enrollment = persist;
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        if persist {
            if let Some(hash) = self.state.enrolled_hash() {
                store.save(&hash.to_hex())?;
            }
        } else {
            store.clear()?;
        }
        Ok(())
    }

    pub fn enrolled_hash_hex(&self) -> Option<String> {
        self.state.enrolled_hash().map(PerceptualHash::to_hex)
    }

    pub fn state(&self) -> &EnrollmentState {
        &self.state
    }

    pub fn config(&self) -> &FaceLockConfig {
        &self.config
    }
}
