//! Match generation from the favorites set.

use pupfinder_core::search::CatalogService;
use pupfinder_core::{Dog, PupError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::favorites_store::FavoritesStore;
use crate::session_gate::SessionGate;

/// Submits favorites to the match endpoint and holds the resolved match.
///
/// A match is stored only once its record has been resolved. Any failure
/// leaves no match at all.
pub struct MatchEngine {
    catalog: Arc<dyn CatalogService>,
    gate: Arc<SessionGate>,
    favorites: FavoritesStore,
    current: RwLock<Option<Dog>>,
    generation: AtomicU64,
}

impl MatchEngine {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        gate: Arc<SessionGate>,
        favorites: FavoritesStore,
    ) -> Self {
        Self {
            catalog,
            gate,
            favorites,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Requests a match for the current favorites.
    ///
    /// # Errors
    ///
    /// - `NoFavorites` when the set is empty; no request is made
    /// - `NotAuthenticated` without a valid session; no request is made
    /// - `MatchFailed` when either call fails or the matched id does not
    ///   resolve to a record
    pub async fn generate_match(&self) -> Result<Dog> {
        let ids = self.favorites.ids().await;
        if ids.is_empty() {
            return Err(PupError::NoFavorites);
        }
        self.gate.require_authenticated().await?;

        let token = {
            let mut current = self.current.write().await;
            *current = None;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.resolve(&ids).await;

        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!(generation = token, "Discarding superseded match");
            return Err(PupError::MatchFailed("match request superseded".to_string()));
        }

        match result {
            Ok(dog) => {
                tracing::info!(dog_id = %dog.id, favorites = ids.len(), "Match generated");
                *current = Some(dog.clone());
                Ok(dog)
            }
            Err(e) => {
                tracing::error!("Match failed: {}", e);
                Err(e)
            }
        }
    }

    async fn resolve(&self, ids: &[String]) -> Result<Dog> {
        let matched = self
            .catalog
            .match_dogs(ids)
            .await
            .map_err(|e| PupError::MatchFailed(e.to_string()))?;

        let records = self
            .catalog
            .fetch_dogs(std::slice::from_ref(&matched))
            .await
            .map_err(|e| PupError::MatchFailed(e.to_string()))?;

        records
            .into_iter()
            .find(|dog| dog.id == matched)
            .ok_or_else(|| PupError::MatchFailed(format!("matched dog {} not found", matched)))
    }

    pub async fn current_match(&self) -> Option<Dog> {
        self.current.read().await.clone()
    }

    pub async fn dismiss_match(&self) {
        *self.current.write().await = None;
    }

    /// Drops the match and invalidates any request still in flight.
    pub async fn clear(&self) {
        let mut current = self.current.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockCatalog, anonymous_gate, authed_gate, dog};

    fn engine(catalog: Arc<MockCatalog>) -> (MatchEngine, FavoritesStore) {
        let favorites = FavoritesStore::new();
        let engine = MatchEngine::new(catalog, authed_gate(), favorites.clone());
        (engine, favorites)
    }

    fn shelter() -> Vec<Dog> {
        vec![dog("5", "Fido", "Poodle"), dog("9", "Nina", "Beagle")]
    }

    #[tokio::test]
    async fn test_empty_favorites_make_no_calls() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        let (engine, _) = engine(catalog.clone());

        let err = engine.generate_match().await.unwrap_err();
        assert!(err.is_no_favorites());
        assert_eq!(err.user_message(), "must have at least one favorite");
        assert!(catalog.calls().is_empty());
        assert!(engine.current_match().await.is_none());
    }

    #[tokio::test]
    async fn test_match_is_resolved_and_stored() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        catalog.set_match(Ok("9".to_string()));
        let (engine, favorites) = engine(catalog.clone());
        favorites.toggle(dog("5", "Fido", "Poodle")).await;
        favorites.toggle(dog("9", "Nina", "Beagle")).await;

        let matched = engine.generate_match().await.unwrap();
        assert_eq!(matched.name, "Nina");
        assert_eq!(engine.current_match().await, Some(matched));

        let calls = catalog.calls();
        match &calls[0] {
            Call::Match(ids) => {
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(sorted, vec!["5", "9"]);
            }
            other => panic!("expected match call, got {:?}", other),
        }
        assert_eq!(calls[1], Call::FetchDogs(vec!["9".to_string()]));
    }

    #[tokio::test]
    async fn test_match_endpoint_failure() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        catalog.set_match(Err(PupError::transport(Some(500), "down")));
        let (engine, favorites) = engine(catalog.clone());
        favorites.toggle(dog("5", "Fido", "Poodle")).await;

        let err = engine.generate_match().await.unwrap_err();
        assert!(matches!(err, PupError::MatchFailed(_)));
        assert_eq!(err.user_message(), "Match failed");
        assert!(catalog.fetch_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_match_stores_nothing() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        let (engine, favorites) = engine(catalog.clone());
        favorites.toggle(dog("5", "Fido", "Poodle")).await;

        catalog.set_match(Ok("5".to_string()));
        engine.generate_match().await.unwrap();
        assert!(engine.current_match().await.is_some());

        // unknown id: previous match is gone, no partial match is stored
        catalog.set_match(Ok("404".to_string()));
        let err = engine.generate_match().await.unwrap_err();
        assert!(matches!(err, PupError::MatchFailed(_)));
        assert!(engine.current_match().await.is_none());
    }

    #[tokio::test]
    async fn test_detail_failure_is_match_failure() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        catalog.set_match(Ok("5".to_string()));
        catalog.fail_fetch();
        let (engine, favorites) = engine(catalog);
        favorites.toggle(dog("5", "Fido", "Poodle")).await;

        let err = engine.generate_match().await.unwrap_err();
        assert!(matches!(err, PupError::MatchFailed(_)));
        assert!(engine.current_match().await.is_none());
    }

    #[tokio::test]
    async fn test_dismiss_and_clear() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        catalog.set_match(Ok("5".to_string()));
        let (engine, favorites) = engine(catalog);
        favorites.toggle(dog("5", "Fido", "Poodle")).await;

        engine.generate_match().await.unwrap();
        engine.dismiss_match().await;
        assert!(engine.current_match().await.is_none());

        engine.generate_match().await.unwrap();
        engine.clear().await;
        assert!(engine.current_match().await.is_none());
    }

    #[tokio::test]
    async fn test_unauthenticated_match_makes_no_calls() {
        let catalog = Arc::new(MockCatalog::new(shelter()));
        let favorites = FavoritesStore::new();
        favorites.toggle(dog("5", "Fido", "Poodle")).await;
        let engine = MatchEngine::new(catalog.clone(), anonymous_gate(), favorites);

        assert!(engine.generate_match().await.unwrap_err().is_not_authenticated());
        assert!(catalog.calls().is_empty());
    }
}
