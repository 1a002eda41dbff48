//! Session record stores.
//!
//! `TomlSessionStore` keeps the record in `session.toml` under the
//! `[authed]` table so it survives restarts the way the browser cookie
//! does. `InMemorySessionStore` is process-local.

use async_trait::async_trait;
use pupfinder_core::session::{SessionRecord, SessionStore};
use pupfinder_core::{PupError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::paths::PupfinderPaths;
use crate::storage::AtomicTomlFile;

/// On-disk shape of `session.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    authed: Option<SessionRecord>,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct TomlSessionStore {
    file: AtomicTomlFile<SessionFile>,
}

impl TomlSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Creates a store at the session file location of `paths`.
    pub fn from_paths(paths: &PupfinderPaths) -> Result<Self> {
        Ok(Self::new(paths.session_file()?))
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(AtomicTomlFile<SessionFile>) -> Result<T> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(file))
            .await
            .map_err(|e| PupError::internal(format!("session store task failed: {}", e)))?
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        self.blocking(|file| Ok(file.load()?.and_then(|f| f.authed)))
            .await
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let record = record.clone();
        self.blocking(move |file| {
            file.update(SessionFile::default(), |f| {
                f.authed = Some(record);
                Ok(())
            })?;
            Ok(())
        })
        .await?;
        tracing::debug!(path = %self.file.path().display(), "Session record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| Ok(file.remove()?)).await?;
        tracing::debug!(path = %self.file.path().display(), "Session record cleared");
        Ok(())
    }
}

/// Process-local session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    record: Arc<RwLock<Option<SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `record`.
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record))),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.record.write().await = None;
        Ok(())
    }
}
