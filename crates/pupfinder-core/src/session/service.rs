//! Remote session service trait.

use async_trait::async_trait;

use super::model::Credentials;
use crate::error::Result;

/// Server-side session establishment.
///
/// The server keeps its own cookie-based session; the local
/// `SessionRecord` used for gating is a separate concern handled by the
/// caller.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    async fn logout(&self) -> Result<()>;
}
