//! Catalog service trait definition.

use async_trait::async_trait;

use crate::dog::Dog;
use crate::error::Result;
use crate::search::{SearchQuery, SearchResultPage};

/// Remote catalog, search and match operations.
///
/// Implementations only translate to and from the wire; ordering, caching
/// and authentication gating are the caller's concern.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns every breed name known to the catalog.
    async fn breeds(&self) -> Result<Vec<String>>;

    /// Executes one search and returns the page of identifiers.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage>;

    /// Resolves identifiers into dogs.
    ///
    /// The returned order is whatever the service chooses; it is not
    /// guaranteed to follow `ids`.
    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>>;

    /// Submits favorite identifiers and returns the single matched id.
    async fn match_dogs(&self, ids: &[String]) -> Result<String>;
}
