//! Configuration loading.
//!
//! Priority: environment (`PUPFINDER_BASE_URL`) > config.toml > defaults.

use pupfinder_core::{ClientConfig, PupError, Result};
use std::env;

use crate::paths::PupfinderPaths;
use crate::storage::AtomicTomlFile;

pub const BASE_URL_ENV: &str = "PUPFINDER_BASE_URL";

/// Loads `ClientConfig` from `config.toml`, writing the defaults on first
/// run so the file is discoverable.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(paths: &PupfinderPaths) -> Result<Self> {
        Ok(Self {
            file: AtomicTomlFile::new(paths.config_file()?),
        })
    }

    /// Loads the effective configuration.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = match self.file.load()? {
            Some(config) => config,
            None => {
                let config = ClientConfig::default();
                if let Err(e) = self.file.save(&config) {
                    tracing::warn!(
                        path = %self.file.path().display(),
                        "Could not write default config: {}",
                        e
                    );
                }
                config
            }
        };

        if let Ok(base_url) = env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url.trim().to_string();
        }

        validate(&config)?;
        Ok(config)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        validate(config)?;
        Ok(self.file.save(config)?)
    }
}

fn validate(config: &ClientConfig) -> Result<()> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(PupError::config(format!(
            "base_url must be an http(s) URL, got '{}'",
            config.base_url
        )));
    }
    if config.page_size == 0 {
        return Err(PupError::config("page_size must be at least 1"));
    }
    if config.session_ttl_secs <= 0 {
        return Err(PupError::config("session_ttl_secs must be positive"));
    }
    Ok(())
}
