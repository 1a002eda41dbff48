//! TOML files replaced atomically.
//!
//! Small files (config, session record) are written to a sibling temp file
//! and renamed over the target. `update` runs its read-modify-write while
//! holding an exclusive lock on a persistent `<name>.lock` sibling.

use pupfinder_core::PupError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Lock error on {path}: {source}")]
    Lock { path: PathBuf, source: io::Error },
}

impl From<AtomicTomlError> for PupError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            lock @ AtomicTomlError::Lock { .. } => PupError::io(lock.to_string()),
        }
    }
}

/// Handle to a TOML file holding one `T`.
#[derive(Debug, Clone)]
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    /// Writes `data` to the temp sibling, syncs it, then renames it over
    /// the target. Parent directories are created as needed.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let body = toml::to_string_pretty(data)?;
        let (dir, tmp_path) = self.sibling(".tmp")?;
        fs::create_dir_all(&dir)?;

        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(body.as_bytes())?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), AtomicTomlError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Read-modify-write under an exclusive lock. `default_value` stands in
    /// for a missing file.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let (dir, lock_path) = self.sibling(".lock")?;
        fs::create_dir_all(&dir)?;
        let _guard = LockGuard::exclusive(lock_path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    /// Parent directory and the hidden `.<name><suffix>` path beside the file.
    fn sibling(&self, suffix: &str) -> Result<(PathBuf, PathBuf), AtomicTomlError> {
        let (Some(dir), Some(name)) = (self.path.parent(), self.path.file_name()) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", self.path.display()),
            )
            .into());
        };
        let sibling = dir.join(format!(".{}{}", name.to_string_lossy(), suffix));
        Ok((dir.to_path_buf(), sibling))
    }
}

/// Holds an fs2 exclusive lock until dropped. The lock file is never
/// deleted.
struct LockGuard {
    file: File,
}

impl LockGuard {
    fn exclusive(path: PathBuf) -> Result<Self, AtomicTomlError> {
        use fs2::FileExt;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()
            .map_err(|source| AtomicTomlError::Lock { path, source })?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        use fs2::FileExt;

        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release TOML file lock: {}", e);
        }
    }
}
