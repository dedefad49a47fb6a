//! FaceLock - Configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FaceLockError, FaceLockResult};
use crate::matcher::DEFAULT_THRESHOLD;
use crate::phash::DEFAULT_GRID_SIZE;
use crate::session::DEFAULT_PROMPTS;

/// Matching and persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLockConfig {
    /// Maximum Hamming distance accepted
    pub threshold: u32,
    /// Perceptual hash grid edge
    pub grid_size: u32,
    /// Liveness prompts to draw from
    pub prompts: Vec<String>,
    /// Where the enrolled hash is cached (none = memory only)
    pub store_path: Option<PathBuf>,
    /// Write the enrolled hash to the store
    pub persist_enrollment: bool,
}

impl Default for FaceLockConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            grid_size: DEFAULT_GRID_SIZE,
            prompts: DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect(),
            store_path: None,
            persist_enrollment: false,
        }
    }
}

impl FaceLockConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> FaceLockResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        let config: Self = serde_json::from_slice(&data)
            .map_err(|e| FaceLockError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engines cannot work with
    pub fn validate(&self) -> FaceLockResult<()> {
        if self.grid_size == 0 || self.grid_size % 2 != 0 {
            return Err(FaceLockError::InvalidConfig(format!(
                "grid_size must be a non-zero even number, got {}",
                self.grid_size
            )));
        }
        if self.prompts.iter().all(|p| p.trim().is_empty()) {
            return Err(FaceLockError::InvalidConfig("at least one liveness prompt is required".into()));
        }
        Ok(())
    }

    /// Number of bits in a hash produced under this config
    pub fn hash_bits(&self) -> u32 {
        self.grid_size * self.grid_size
    }
}
