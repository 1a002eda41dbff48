//! Favorites domain module.

mod model;

pub use model::{FavoriteToggle, FavoritesSet};
