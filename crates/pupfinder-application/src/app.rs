//! PupFinder - composition root wiring the gate, pipeline, favorites and
//! match engine onto one set of ports.

use pupfinder_core::favorites::FavoriteToggle;
use pupfinder_core::search::CatalogService;
use pupfinder_core::session::{AuthService, SessionRecord, SessionStore};
use pupfinder_core::{ClientConfig, Dog, PupError, Result};
use pupfinder_infrastructure::{PupfinderPaths, TomlSessionStore};
use pupfinder_interaction::HttpCatalogClient;
use std::sync::Arc;

use crate::favorites_store::FavoritesStore;
use crate::match_engine::MatchEngine;
use crate::search_pipeline::SearchPipeline;
use crate::session_gate::SessionGate;

pub struct PupFinder {
    config: ClientConfig,
    gate: Arc<SessionGate>,
    search: Arc<SearchPipeline>,
    favorites: FavoritesStore,
    matcher: Arc<MatchEngine>,
}

impl PupFinder {
    /// Builds the components on top of injected ports.
    pub fn new(
        config: ClientConfig,
        catalog: Arc<dyn CatalogService>,
        auth: Arc<dyn AuthService>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let gate = Arc::new(SessionGate::new(store, auth, config.session_ttl()));
        let search = Arc::new(SearchPipeline::new(
            catalog.clone(),
            gate.clone(),
            config.page_size,
        ));
        let favorites = FavoritesStore::new();
        let matcher = Arc::new(MatchEngine::new(catalog, gate.clone(), favorites.clone()));

        Self {
            config,
            gate,
            search,
            favorites,
            matcher,
        }
    }

    /// Wires the HTTP client and the on-disk session record.
    pub fn connect(config: ClientConfig, paths: &PupfinderPaths) -> Result<Self> {
        let client = Arc::new(HttpCatalogClient::from_config(&config)?);
        let store = Arc::new(TomlSessionStore::from_paths(paths)?);
        tracing::info!(base_url = %client.base_url(), "PupFinder connected");
        Ok(Self::new(config, client.clone(), client, store))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gate(&self) -> &Arc<SessionGate> {
        &self.gate
    }

    pub fn search(&self) -> &Arc<SearchPipeline> {
        &self.search
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn matcher(&self) -> &Arc<MatchEngine> {
        &self.matcher
    }

    pub async fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated().await
    }

    /// Logs in and starts from empty per-session state.
    ///
    /// A session that expired without a logout leaves favorites, search
    /// state and a match behind; they are dropped here.
    pub async fn login(&self, name: &str, email: &str) -> Result<SessionRecord> {
        let record = self.gate.login(name, email).await?;
        self.clear_session_state().await;
        Ok(record)
    }

    /// Logs out and drops every piece of per-session state, even when the
    /// remote call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.gate.logout().await;
        self.clear_session_state().await;
        result
    }

    async fn clear_session_state(&self) {
        self.favorites.clear().await;
        self.search.clear().await;
        self.matcher.clear().await;
    }

    pub async fn toggle_favorite(&self, dog: Dog) -> FavoriteToggle {
        self.favorites.toggle(dog).await
    }

    /// Toggles by id: a favorite is removed, a dog on the current page is
    /// added.
    pub async fn toggle_favorite_by_id(&self, id: &str) -> Result<FavoriteToggle> {
        if self.favorites.remove(id).await {
            return Ok(FavoriteToggle::Removed);
        }
        match self.search.find_dog(id).await {
            Some(dog) => Ok(self.favorites.toggle(dog).await),
            None => Err(PupError::internal(format!(
                "dog {} is not on the current page",
                id
            ))),
        }
    }
}
