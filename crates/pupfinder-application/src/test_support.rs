//! Hand-written mock ports shared by the application tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use pupfinder_core::search::{CatalogService, SearchQuery, SearchResultPage};
use pupfinder_core::session::{AuthService, Credentials, SessionRecord};
use pupfinder_core::{Dog, PupError, Result};
use pupfinder_infrastructure::InMemorySessionStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::session_gate::SessionGate;

pub fn dog(id: &str, name: &str, breed: &str) -> Dog {
    Dog {
        id: id.to_string(),
        name: name.to_string(),
        breed: breed.to_string(),
        age: 3,
        zip_code: format!("1000{}", id.len()),
        image_url: format!("https://img.example.com/{}.jpg", id),
    }
}

pub fn valid_record() -> SessionRecord {
    let credentials = Credentials::new("john", "john@gmail.com").unwrap();
    SessionRecord::issue(&credentials, Utc::now(), Duration::hours(1))
}

pub fn expired_record() -> SessionRecord {
    let credentials = Credentials::new("john", "john@gmail.com").unwrap();
    SessionRecord::issue(&credentials, Utc::now() - Duration::hours(2), Duration::hours(1))
}

/// Gate with a valid session already stored.
pub fn authed_gate() -> Arc<SessionGate> {
    Arc::new(SessionGate::new(
        Arc::new(InMemorySessionStore::with_record(valid_record())),
        Arc::new(MockAuth::new()),
        Duration::hours(1),
    ))
}

/// Gate with no session.
pub fn anonymous_gate() -> Arc<SessionGate> {
    Arc::new(SessionGate::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(MockAuth::new()),
        Duration::hours(1),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Breeds,
    Search(SearchQuery),
    FetchDogs(Vec<String>),
    Match(Vec<String>),
}

type SearchFn = Box<dyn Fn(&SearchQuery) -> Result<SearchResultPage> + Send + Sync>;

/// In-memory catalog.
///
/// Searches filter by `breeds`, page by `size`/`from` and emit relative
/// next/prev links like the real service. Detail lookups answer in reverse
/// request order so callers must restore ordering themselves.
pub struct MockCatalog {
    dogs: Vec<Dog>,
    search_fn: Option<SearchFn>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
    breeds_hold: Mutex<Option<Arc<Notify>>>,
    fail_fetch: AtomicBool,
    match_result: Mutex<Result<String>>,
    calls: Mutex<Vec<Call>>,
}

impl MockCatalog {
    pub fn new(dogs: Vec<Dog>) -> Self {
        Self {
            dogs,
            search_fn: None,
            holds: Mutex::new(HashMap::new()),
            breeds_hold: Mutex::new(None),
            fail_fetch: AtomicBool::new(false),
            match_result: Mutex::new(Err(PupError::internal("no match configured"))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search<F>(mut self, f: F) -> Self
    where
        F: Fn(&SearchQuery) -> Result<SearchResultPage> + Send + Sync + 'static,
    {
        self.search_fn = Some(Box::new(f));
        self
    }

    /// Searches that include `breed` wait until the returned handle is
    /// notified.
    pub fn hold_breed(&self, breed: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.holds
            .lock()
            .unwrap()
            .insert(breed.to_string(), notify.clone());
        notify
    }

    /// Breed list requests wait until the returned handle is notified.
    pub fn hold_breeds(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.breeds_hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn fail_fetch(&self) {
        self.fail_fetch.store(true, Ordering::SeqCst);
    }

    pub fn set_match(&self, result: Result<String>) {
        *self.match_result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<SearchQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn fetch_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::FetchDogs(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn default_search(&self, query: &SearchQuery) -> SearchResultPage {
        let breeds = query.get_all("breeds");
        let matching: Vec<&Dog> = self
            .dogs
            .iter()
            .filter(|d| breeds.is_empty() || breeds.contains(&d.breed.as_str()))
            .collect();
        let size: usize = query.get("size").and_then(|s| s.parse().ok()).unwrap_or(25);
        let from: usize = query.get("from").and_then(|s| s.parse().ok()).unwrap_or(0);

        let result_ids = matching
            .iter()
            .skip(from)
            .take(size)
            .map(|d| d.id.clone())
            .collect();
        let next = (from + size < matching.len())
            .then(|| format!("/dogs/search?size={}&from={}", size, from + size));
        let prev = (from > 0)
            .then(|| format!("/dogs/search?size={}&from={}", size, from.saturating_sub(size)));

        SearchResultPage {
            result_ids,
            total: matching.len() as u64,
            next,
            prev,
        }
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn breeds(&self) -> Result<Vec<String>> {
        self.record(Call::Breeds);
        let hold = self.breeds_hold.lock().unwrap().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        let mut breeds: Vec<String> = self.dogs.iter().map(|d| d.breed.clone()).collect();
        breeds.sort();
        breeds.dedup();
        Ok(breeds)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        self.record(Call::Search(query.clone()));

        let hold = {
            let holds = self.holds.lock().unwrap();
            query
                .get_all("breeds")
                .iter()
                .find_map(|breed| holds.get(*breed).cloned())
        };
        if let Some(notify) = hold {
            notify.notified().await;
        }

        match &self.search_fn {
            Some(f) => f(query),
            None => Ok(self.default_search(query)),
        }
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        self.record(Call::FetchDogs(ids.to_vec()));
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(PupError::transport(Some(500), "dogs unavailable"));
        }
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| self.dogs.iter().find(|d| d.id == *id).cloned())
            .collect())
    }

    async fn match_dogs(&self, ids: &[String]) -> Result<String> {
        self.record(Call::Match(ids.to_vec()));
        self.match_result.lock().unwrap().clone()
    }
}

/// Session service that records calls and fails on request.
#[derive(Default)]
pub struct MockAuth {
    fail_login: AtomicBool,
    fail_logout: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_login(&self) {
        self.fail_login.store(true, Ordering::SeqCst);
    }

    pub fn fail_logout(&self) {
        self.fail_logout.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<()> {
        self.calls.lock().unwrap().push("login");
        if self.fail_login.load(Ordering::SeqCst) {
            return Err(PupError::transport(Some(401), "Unauthorized"));
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.calls.lock().unwrap().push("logout");
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(PupError::transport(None, "connection reset"));
        }
        Ok(())
    }
}
