//! Session Gate: decides whether catalog operations may run.

use chrono::{DateTime, Duration, Utc};
use pupfinder_core::session::{AuthService, Credentials, SessionRecord, SessionStore};
use pupfinder_core::{PupError, Result};
use std::sync::Arc;

/// Owns the local session record and the login/logout flow.
///
/// Every catalog, search and match operation calls
/// [`SessionGate::require_authenticated`] before touching the network.
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthService>,
    ttl: Duration,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>, auth: Arc<dyn AuthService>, ttl: Duration) -> Self {
        Self { store, auth, ttl }
    }

    /// Returns the stored record if it is still valid at `now`.
    ///
    /// An expired record is removed from the store on the way out.
    pub async fn current_session_at(&self, now: DateTime<Utc>) -> Result<Option<SessionRecord>> {
        match self.store.load().await? {
            Some(record) if record.is_valid_at(now) => Ok(Some(record)),
            Some(record) => {
                tracing::info!(
                    expired_at = %record.expires_at,
                    "Session record expired, clearing"
                );
                self.store.clear().await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub async fn current_session(&self) -> Result<Option<SessionRecord>> {
        self.current_session_at(Utc::now()).await
    }

    /// True iff a non-expired session record is present at `now`.
    ///
    /// A store that cannot be read counts as unauthenticated.
    pub async fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        match self.current_session_at(now).await {
            Ok(record) => record.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read session record: {}", e);
                false
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now()).await
    }

    /// Fails with `NotAuthenticated` unless a valid session exists.
    pub async fn require_authenticated(&self) -> Result<SessionRecord> {
        match self.current_session().await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(PupError::NotAuthenticated),
            Err(e) => {
                tracing::warn!("Failed to read session record: {}", e);
                Err(PupError::NotAuthenticated)
            }
        }
    }

    /// Logs in remotely and records the local session.
    ///
    /// Invalid form values are rejected before any request. A rejected
    /// login leaves no session record behind.
    pub async fn login(&self, name: &str, email: &str) -> Result<SessionRecord> {
        let credentials = Credentials::new(name, email)?;

        if let Err(e) = self.auth.login(&credentials).await {
            tracing::error!("Login failed: {}", e);
            return Err(PupError::Authentication(e.to_string()));
        }

        let record = SessionRecord::issue(&credentials, Utc::now(), self.ttl);
        self.store.save(&record).await?;
        tracing::info!(name = %record.name, expires_at = %record.expires_at, "Logged in");
        Ok(record)
    }

    /// Logs out remotely, then clears the local record regardless of the
    /// remote outcome. A remote failure is still reported as `LogoutFailed`.
    pub async fn logout(&self) -> Result<()> {
        let remote = self.auth.logout().await;
        self.store.clear().await?;

        match remote {
            Ok(()) => {
                tracing::info!("Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Logout failed, local session cleared anyway: {}", e);
                Err(PupError::LogoutFailed(e.to_string()))
            }
        }
    }
}
