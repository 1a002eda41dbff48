//! Favorites set domain model.

use serde::{Deserialize, Serialize};

use crate::dog::Dog;

/// Effect of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// User-curated set of dogs, keyed by identifier.
///
/// Membership is independent of the page or search that produced a dog, so
/// the set survives pagination and filter changes. Insertion order is kept
/// for display only; the match endpoint treats the ids as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesSet {
    dogs: Vec<Dog>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the dog if present, adds it otherwise.
    pub fn toggle(&mut self, dog: Dog) -> FavoriteToggle {
        match self.position(&dog.id) {
            Some(index) => {
                self.dogs.remove(index);
                FavoriteToggle::Removed
            }
            None => {
                self.dogs.push(dog);
                FavoriteToggle::Added
            }
        }
    }

    /// Removes by identifier. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.dogs.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<String> {
        self.dogs.iter().map(|dog| dog.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dog> {
        self.dogs.iter()
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    pub fn clear(&mut self) {
        self.dogs.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.dogs.iter().position(|dog| dog.id == id)
    }
}
