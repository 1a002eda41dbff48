//! Unified path management for PupFinder files.
//!
//! Everything lives under one config directory so that a `--config-dir`
//! override relocates config, session and logs together.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "pupfinder";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for pupfinder_core::PupError {
    fn from(err: PathError) -> Self {
        pupfinder_core::PupError::config(err.to_string())
    }
}

/// Path resolver for PupFinder.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/pupfinder/         # Config directory (platform default)
/// ├── config.toml              # Client configuration
/// ├── session.toml             # Local session record ([authed] table)
/// └── logs/                    # REPL logs
///     └── pupfinder.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone)]
pub struct PupfinderPaths {
    base: Option<PathBuf>,
}

impl PupfinderPaths {
    /// Creates a resolver. `base` replaces the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the config directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: The override, or e.g. `~/.config/pupfinder/`
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for PupfinderPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
