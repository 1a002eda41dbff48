//! HttpCatalogClient - REST implementation of the catalog and session
//! services.
//!
//! The service authenticates with an HTTP-only cookie set by
//! `POST /auth/login`, so the underlying `reqwest::Client` keeps a cookie
//! store and every later call carries it.

use async_trait::async_trait;
use pupfinder_core::search::{CatalogService, SearchQuery, SearchResultPage};
use pupfinder_core::session::{AuthService, Credentials};
use pupfinder_core::{ClientConfig, Dog, PupError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::wire::{LoginRequest, MatchResponse};

/// Client for the shelter-dog catalog service.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCatalogClient {
    /// Creates a client for `base_url` with a fresh cookie jar.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| PupError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and maps transport failures and non-2xx statuses.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PupError::transport(None, format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PupError::transport(
                Some(status.as_u16()),
                format!("{} returned {}: {}", what, status, error_text.trim()),
            ));
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| PupError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse {} response: {}", what, e),
        })
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn breeds(&self) -> Result<Vec<String>> {
        let request = self.client.get(self.url("/dogs/breeds"));
        let response = self.send(request, "breeds").await?;
        Self::json(response, "breeds").await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResultPage> {
        tracing::debug!(query = %query.to_query_string(), "GET /dogs/search");
        let request = self.client.get(self.url("/dogs/search")).query(query.pairs());
        let response = self.send(request, "search").await?;
        Self::json(response, "search").await
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        tracing::debug!(count = ids.len(), "POST /dogs");
        let request = self.client.post(self.url("/dogs")).json(ids);
        let response = self.send(request, "dogs").await?;
        Self::json(response, "dogs").await
    }

    async fn match_dogs(&self, ids: &[String]) -> Result<String> {
        tracing::debug!(count = ids.len(), "POST /dogs/match");
        let request = self.client.post(self.url("/dogs/match")).json(ids);
        let response = self.send(request, "match").await?;
        let body: MatchResponse = Self::json(response, "match").await?;
        Ok(body.matched)
    }
}

#[async_trait]
impl AuthService for HttpCatalogClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let body = LoginRequest {
            name: credentials.name(),
            email: credentials.email(),
        };
        let request = self.client.post(self.url("/auth/login")).json(&body);
        self.send(request, "login").await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let request = self.client.post(self.url("/auth/logout"));
        self.send(request, "logout").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            HttpCatalogClient::new("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.url("/dogs"), "https://example.com/dogs");
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::default();
        let client = HttpCatalogClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), config.base_url);
    }
}
