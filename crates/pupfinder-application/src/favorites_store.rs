//! Shared favorites set.

use pupfinder_core::Dog;
use pupfinder_core::favorites::{FavoriteToggle, FavoritesSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The single writer of the user's favorites.
///
/// Cloning shares the underlying set, so the match engine and the facade
/// always see the same membership.
#[derive(Clone, Default)]
pub struct FavoritesStore {
    set: Arc<RwLock<FavoritesSet>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn toggle(&self, dog: Dog) -> FavoriteToggle {
        let dog_id = dog.id.clone();
        let effect = self.set.write().await.toggle(dog);
        tracing::debug!(dog_id = %dog_id, ?effect, "Favorite toggled");
        effect
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.set.write().await.remove(id)
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.set.read().await.contains(id)
    }

    pub async fn ids(&self) -> Vec<String> {
        self.set.read().await.ids()
    }

    /// Favorites in the order they were added.
    pub async fn snapshot(&self) -> Vec<Dog> {
        self.set.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.set.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.set.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.set.write().await.clear();
    }
}
