//! FaceLock - Enrollment & Liveness Session
//!
//! One enrolled hash and one liveness challenge per session.
//!
//! ```text
//! enrollment: Unenrolled ──enroll──▶ Enrolled ──enroll──▶ Enrolled (overwritten)
//! liveness:   NoChallenge ──issue──▶ Issued ──complete──▶ Completed ──issue──▶ Issued
//! ```
//!
//! A completed challenge is not tied to the enrollment or to a particular
//! match attempt: any completed challenge satisfies any later match.

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{FaceLockError, FaceLockResult};
use crate::matcher::{evaluate, MatchOutcome};
use crate::phash::PerceptualHash;

/// Prompts offered when no configuration overrides them
pub const DEFAULT_PROMPTS: [&str; 6] = [
    "Turn your head left",
    "Turn your head right",
    "Smile briefly",
    "Blink twice",
    "Look up",
    "Look down",
];

/// An issued liveness prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Instruction shown to the user
    pub prompt: String,
    /// When it was issued
    pub issued_at: DateTime<Utc>,
}

/// Session state: enrolled hash plus liveness flag.
///
/// Methods take `&mut self`; sharing one instance between threads needs
/// external mutual exclusion supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentState {
    enrolled_hash: Option<PerceptualHash>,
    active_challenge: Option<Challenge>,
    challenge_completed: bool,
}

impl EnrollmentState {
    /// Fresh, unenrolled session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `hash` as the enrolled face, replacing any previous one
    pub fn enroll(&mut self, hash: PerceptualHash) {
        debug!("Enrolled hash {}", hash.preview());
        self.enrolled_hash = Some(hash);
    }

    /// Issue a new prompt; any earlier completion is discarded
    pub fn issue_challenge(&mut self, prompt: impl Into<String>) -> &Challenge {
        self.challenge_completed = false;
        self.active_challenge.insert(Challenge {
            prompt: prompt.into(),
            issued_at: Utc::now(),
        })
    }

    /// Mark the active challenge as done
    pub fn complete_challenge(&mut self) -> FaceLockResult<()> {
        if self.active_challenge.is_none() {
            return Err(FaceLockError::NoActiveChallenge);
        }
        self.challenge_completed = true;
        Ok(())
    }

    /// Compare `probe` with the enrolled hash under `threshold`
    pub fn attempt_match(&self, probe: &PerceptualHash, threshold: u32) -> FaceLockResult<MatchOutcome> {
        let enrolled = self.enrolled_hash.as_ref().ok_or(FaceLockError::NotEnrolled)?;
        evaluate(enrolled, probe, threshold, self.challenge_completed)
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrolled_hash.is_some()
    }

    pub fn enrolled_hash(&self) -> Option<&PerceptualHash> {
        self.enrolled_hash.as_ref()
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.active_challenge.as_ref()
    }

    pub fn challenge_completed(&self) -> bool {
        self.challenge_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(fill: bool) -> PerceptualHash {
        PerceptualHash::from_bits(vec![fill; 256])
    }

    #[test]
    fn test_match_requires_enrollment() {
        let state = EnrollmentState::new();
        assert!(matches!(
            state.attempt_match(&hash(true), 85),
            Err(FaceLockError::NotEnrolled)
        ));
    }

    #[test]
    fn test_complete_without_challenge() {
        let mut state = EnrollmentState::new();
        assert!(matches!(state.complete_challenge(), Err(FaceLockError::NoActiveChallenge)));
        assert!(!state.challenge_completed());
    }

    #[test]
    fn test_liveness_gates_match() {
        let mut state = EnrollmentState::new();
        state.enroll(hash(true));
        state.issue_challenge("Blink twice");

        let denied = state.attempt_match(&hash(true), 85).unwrap();
        assert!(!denied.accepted);
        assert_eq!(denied.distance, 0);

        state.complete_challenge().unwrap();
        let accepted = state.attempt_match(&hash(true), 85).unwrap();
        assert!(accepted.accepted);
    }

    #[test]
    fn test_new_challenge_resets_completion() {
        let mut state = EnrollmentState::new();
        state.issue_challenge("Look up");
        state.complete_challenge().unwrap();
        assert!(state.challenge_completed());

        let challenge = state.issue_challenge("Look down");
        assert_eq!(challenge.prompt, "Look down");
        assert!(!state.challenge_completed());
    }

    #[test]
    fn test_reenroll_overwrites() {
        let mut state = EnrollmentState::new();
        state.enroll(hash(true));
        state.enroll(hash(false));
        state.issue_challenge("Smile briefly");
        state.complete_challenge().unwrap();

        let outcome = state.attempt_match(&hash(true), 85).unwrap();
        assert_eq!(outcome.distance, 256);
        assert!(!outcome.accepted);
    }

    #[test]
    fn test_challenge_independent_of_enrollment() {
        let mut state = EnrollmentState::new();
        state.issue_challenge("Turn your head left");
        state.complete_challenge().unwrap();
        // enrolling afterwards keeps the completed challenge
        state.enroll(hash(true));
        assert!(state.attempt_match(&hash(true), 85).unwrap().accepted);
    }
}
