//! FaceLock - Enrolled Hash Store
//!
//! Optional persistence for the enrolled hash so it survives a restart.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::FaceLockResult;

/// Small key-value slot holding one enrolled hash (hex)
pub trait HashStore {
    /// Cached hash, if any
    fn load(&self) -> FaceLockResult<Option<String>>;
    /// Replace the cached hash
    fn save(&mut self, hash_hex: &str) -> FaceLockResult<()>;
    /// Drop the cached hash
    fn clear(&mut self) -> FaceLockResult<()>;
}

/// Hash cached in a single file
pub struct FileHashStore {
    path: PathBuf,
}

impl FileHashStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HashStore for FileHashStore {
    fn load(&self) -> FaceLockResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    fn save(&mut self, hash_hex: &str) -> FaceLockResult<()> {
        write_atomic(&self.path, hash_hex.as_bytes())
    }

    fn clear(&mut self) -> FaceLockResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Write to a temp file, then rename over the target
pub fn write_atomic(path: &Path, data: &[u8]) -> FaceLockResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}
