//! FaceLock - Match Decision Engine
//!
//! Pure functions: Hamming distance plus a liveness-gated threshold.

use serde::{Deserialize, Serialize};

use crate::error::{FaceLockError, FaceLockResult};
use crate::phash::PerceptualHash;

/// Default maximum distance accepted (out of 256 bits)
pub const DEFAULT_THRESHOLD: u32 = 85;

/// Accept/deny verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Deny,
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// Outcome of one sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub accepted: bool,
    pub distance: u32,
}

/// Count differing bit positions.
///
/// Hashes of different lengths are incomparable rather than "far apart".
pub fn hamming_distance(a: &PerceptualHash, b: &PerceptualHash) -> FaceLockResult<u32> {
    if a.len() != b.len() {
        return Err(FaceLockError::IncomparableHashes {
            left: a.len(),
            right: b.len(),
        });
    }

    let differing = a
        .bits()
        .iter()
        .zip(b.bits())
        .filter(|(x, y)| x != y)
        .count();
    Ok(differing as u32)
}

/// Accept iff the distance is within `threshold` and the liveness challenge
/// was completed. Neither condition alone is enough.
pub fn decide(distance: u32, threshold: u32, challenge_completed: bool) -> Decision {
    if distance <= threshold && challenge_completed {
        Decision::Accept
    } else {
        Decision::Deny
    }
}

/// Compare `probe` against `reference` and decide
pub fn evaluate(
    reference: &PerceptualHash,
    probe: &PerceptualHash,
    threshold: u32,
    challenge_completed: bool,
) -> FaceLockResult<MatchOutcome> {
    let distance = hamming_distance(reference, probe)?;
    Ok(MatchOutcome {
        accepted: decide(distance, threshold, challenge_completed).is_accept(),
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(pattern: &[u8]) -> PerceptualHash {
        PerceptualHash::from_bits(pattern.iter().map(|&b| b == 1).collect())
    }

    #[test]
    fn test_distance_counts_differences() {
        let a = hash(&[1, 0, 1, 0, 1, 1, 1, 1]);
        let b = hash(&[1, 1, 1, 0, 0, 1, 1, 0]);
        assert_eq!(hamming_distance(&a, &b).unwrap(), 3);
        assert_eq!(hamming_distance(&b, &a).unwrap(), 3);
        assert_eq!(hamming_distance(&a, &a).unwrap(), 0);
    }

    #[test]
    fn test_length_mismatch_is_incomparable() {
        let a = hash(&[1, 0, 1, 0]);
        let b = hash(&[1, 0, 1, 0, 0, 0, 0, 0]);
        assert!(matches!(
            hamming_distance(&a, &b),
            Err(FaceLockError::IncomparableHashes { left: 4, right: 8 })
        ));
    }

    #[test]
    fn test_decision_gating() {
        assert_eq!(decide(0, 85, false), Decision::Deny);
        assert_eq!(decide(85, 85, true), Decision::Accept);
        assert_eq!(decide(86, 85, true), Decision::Deny);
        assert_eq!(decide(0, 0, true), Decision::Accept);
    }

    #[test]
    fn test_evaluate_reports_distance_on_deny() {
        let a = hash(&[1, 1, 1, 1]);
        let b = hash(&[0, 0, 1, 1]);
        let outcome = evaluate(&a, &b, 1, true).unwrap();
        assert_eq!(outcome, MatchOutcome { accepted: false, distance: 2 });
    }
}
