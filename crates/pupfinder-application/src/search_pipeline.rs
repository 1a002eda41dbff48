//! Query Builder & Result Pipeline.
//!
//! Owns the current search criteria and turns them into a resolved page of
//! dogs in two stages: an identifier search followed by one detail lookup.
//! Every run takes a generation token; a response is applied only while its
//! token is still the latest, so a slow answer to an old query never
//! overwrites a newer one.

use pupfinder_core::search::{
    CatalogService, Cursor, ResolvedPage, SearchCriteria, SearchResultPage, SortOrder, TextFilter,
};
use pupfinder_core::{Dog, PupError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::session_gate::SessionGate;

/// A resolved page together with the criteria that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
    pub criteria: SearchCriteria,
    pub page: ResolvedPage,
    pub total: u64,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
}

impl ResolvedView {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The response was current and is now the displayed view
    Applied(ResolvedView),
    /// A newer run started before this one finished; nothing was applied
    Superseded,
    /// The requested page does not exist for the current view; no request
    Unavailable,
}

#[derive(Debug)]
struct PipelineState {
    criteria: SearchCriteria,
    view: Option<ResolvedView>,
    filter: TextFilter,
    error: Option<PupError>,
}

impl PipelineState {
    fn new(page_size: u32) -> Self {
        Self {
            criteria: SearchCriteria::with_page_size(page_size),
            view: None,
            filter: TextFilter::default(),
            error: None,
        }
    }
}

pub struct SearchPipeline {
    catalog: Arc<dyn CatalogService>,
    gate: Arc<SessionGate>,
    page_size: u32,
    state: RwLock<PipelineState>,
    generation: AtomicU64,
    breeds: RwLock<Option<Vec<String>>>,
    /// Bumped by `clear`; a breed fetch from an earlier epoch is not cached
    epoch: AtomicU64,
}

impl SearchPipeline {
    pub fn new(catalog: Arc<dyn CatalogService>, gate: Arc<SessionGate>, page_size: u32) -> Self {
        Self {
            catalog,
            gate,
            page_size,
            state: RwLock::new(PipelineState::new(page_size)),
            generation: AtomicU64::new(0),
            breeds: RwLock::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Running
    // ------------------------------------------------------------------

    /// Runs the current criteria as they are, cursor included.
    pub async fn run(&self) -> Result<PipelineOutcome> {
        self.update_and_run(|_| Ok(())).await
    }

    /// Re-runs the current criteria from the first page.
    pub async fn refresh(&self) -> Result<PipelineOutcome> {
        self.update_and_run(|criteria| {
            criteria.reset_cursor();
            Ok(())
        })
        .await
    }

    pub async fn set_breeds<I, S>(&self, breeds: I) -> Result<PipelineOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_and_run(|criteria| {
            criteria.set_breeds(breeds);
            Ok(())
        })
        .await
    }

    pub async fn toggle_breed(&self, breed: &str) -> Result<PipelineOutcome> {
        self.update_and_run(|criteria| {
            criteria.toggle_breed(breed);
            Ok(())
        })
        .await
    }

    pub async fn set_zip_codes<I, S>(&self, zip_codes: I) -> Result<PipelineOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_and_run(|criteria| {
            criteria.set_zip_codes(zip_codes);
            Ok(())
        })
        .await
    }

    /// Fails with `InvalidCriteria` and issues no request when `max < min`.
    pub async fn set_age_range(&self, min: Option<u32>, max: Option<u32>) -> Result<PipelineOutcome> {
        self.update_and_run(|criteria| criteria.set_age_range(min, max))
            .await
    }

    pub async fn set_sort(&self, sort: SortOrder) -> Result<PipelineOutcome> {
        self.update_and_run(|criteria| {
            criteria.set_sort(sort);
            Ok(())
        })
        .await
    }

    pub async fn reset_filters(&self) -> Result<PipelineOutcome> {
        self.update_and_run(|criteria| {
            criteria.reset_filters();
            Ok(())
        })
        .await
    }

    pub async fn next_page(&self) -> Result<PipelineOutcome> {
        self.turn_page(|view| view.next.clone()).await
    }

    pub async fn prev_page(&self) -> Result<PipelineOutcome> {
        self.turn_page(|view| view.prev.clone()).await
    }

    /// Applies `update` to the criteria and runs them under a fresh token.
    ///
    /// The mutation and the token bump happen under one write lock, so the
    /// token always identifies the criteria it was taken for.
    async fn update_and_run<F>(&self, update: F) -> Result<PipelineOutcome>
    where
        F: FnOnce(&mut SearchCriteria) -> Result<()>,
    {
        self.gate.require_authenticated().await?;

        let (token, criteria) = {
            let mut state = self.state.write().await;
            update(&mut state.criteria)?;
            (self.next_generation(), state.criteria.clone())
        };
        self.execute(token, criteria).await
    }

    /// Moves to the cursor picked from the current view.
    ///
    /// Only a view answered for exactly the current criteria may supply the
    /// cursor. While a newer query is in flight, or after a failure, there
    /// is no page to turn to.
    async fn turn_page<F>(&self, pick: F) -> Result<PipelineOutcome>
    where
        F: FnOnce(&ResolvedView) -> Option<Cursor>,
    {
        self.gate.require_authenticated().await?;

        let (token, criteria) = {
            let mut state = self.state.write().await;
            let cursor = match &state.view {
                Some(view) if view.criteria == state.criteria => pick(view),
                _ => None,
            };
            let Some(cursor) = cursor else {
                tracing::debug!("No page in that direction");
                return Ok(PipelineOutcome::Unavailable);
            };
            state.criteria.set_cursor(cursor);
            (self.next_generation(), state.criteria.clone())
        };
        self.execute(token, criteria).await
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    async fn execute(&self, token: u64, criteria: SearchCriteria) -> Result<PipelineOutcome> {
        let result = self.resolve(&criteria).await;

        let mut state = self.state.write().await;
        if !self.is_current(token) {
            tracing::debug!(
                generation = token,
                latest = self.generation.load(Ordering::SeqCst),
                "Discarding superseded search response"
            );
            return Ok(PipelineOutcome::Superseded);
        }

        match result {
            Ok((page, resolved)) => {
                let view = ResolvedView {
                    criteria,
                    total: page.total,
                    next: page.next_cursor(),
                    prev: page.prev_cursor(),
                    page: resolved,
                };
                tracing::info!(
                    generation = token,
                    shown = view.page.len(),
                    total = view.total,
                    "Search applied"
                );
                state.view = Some(view.clone());
                state.error = None;
                Ok(PipelineOutcome::Applied(view))
            }
            Err(e) => {
                tracing::error!(generation = token, "Search pipeline failed: {}", e);
                state.view = None;
                state.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Search stage followed by the detail stage.
    async fn resolve(&self, criteria: &SearchCriteria) -> Result<(SearchResultPage, ResolvedPage)> {
        let query = criteria.to_query();
        let page = self
            .catalog
            .search(&query)
            .await
            .map_err(|e| PupError::SearchFailed(e.to_string()))?;

        if page.is_empty() {
            return Ok((page, ResolvedPage::empty()));
        }

        let records = self
            .catalog
            .fetch_dogs(&page.result_ids)
            .await
            .map_err(|e| PupError::DetailFailed(e.to_string()))?;
        let resolved = ResolvedPage::reassemble(&page.result_ids, records);
        Ok((page, resolved))
    }

    // ------------------------------------------------------------------
    // Display refinement
    // ------------------------------------------------------------------

    /// Sets the free-text refinement over the current page. Never queries.
    pub async fn set_text_filter(&self, text: &str) {
        self.state.write().await.filter = TextFilter::new(text);
    }

    /// Records of the current view that pass the text filter, in page order.
    pub async fn visible_records(&self) -> Vec<Dog> {
        let state = self.state.read().await;
        match &state.view {
            Some(view) => state
                .filter
                .apply(view.page.dogs())
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub async fn criteria(&self) -> SearchCriteria {
        self.state.read().await.criteria.clone()
    }

    pub async fn current_view(&self) -> Option<ResolvedView> {
        self.state.read().await.view.clone()
    }

    pub async fn last_error(&self) -> Option<PupError> {
        self.state.read().await.error.clone()
    }

    pub async fn text_filter(&self) -> TextFilter {
        self.state.read().await.filter.clone()
    }

    /// Looks up a dog on the current page by id.
    pub async fn find_dog(&self, id: &str) -> Option<Dog> {
        let state = self.state.read().await;
        state
            .view
            .as_ref()
            .and_then(|view| view.page.dogs().iter().find(|dog| dog.id == id).cloned())
    }

    /// Breed names, fetched once per session.
    pub async fn breeds(&self) -> Result<Vec<String>> {
        self.gate.require_authenticated().await?;

        if let Some(breeds) = self.breeds.read().await.as_ref() {
            return Ok(breeds.clone());
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let breeds = self
            .catalog
            .breeds()
            .await
            .map_err(|e| PupError::SearchFailed(format!("breed list: {}", e)))?;

        let mut cache = self.breeds.write().await;
        if self.epoch.load(Ordering::SeqCst) == epoch {
            tracing::debug!(count = breeds.len(), "Breed list cached");
            *cache = Some(breeds.clone());
        } else {
            tracing::debug!("Breed list fetched before clear, not cached");
        }
        Ok(breeds)
    }

    /// Drops criteria, view, filter and the breed cache.
    ///
    /// Also invalidates any run still in flight.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        self.next_generation();
        *state = PipelineState::new(self.page_size);
        drop(state);

        let mut cache = self.breeds.write().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *cache = None;
    }
}
