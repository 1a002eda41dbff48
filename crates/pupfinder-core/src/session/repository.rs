//! Session record storage trait.

use async_trait::async_trait;

use super::model::SessionRecord;
use crate::error::Result;

/// Storage for the single client-visible session record.
///
/// Implementations hold at most one record, under `SESSION_KEY`. Expiry is
/// not checked here; readers decide validity.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored record, expired or not.
    async fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the stored record.
    async fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Removes the stored record. Removing a missing record succeeds.
    async fn clear(&self) -> Result<()>;
}
