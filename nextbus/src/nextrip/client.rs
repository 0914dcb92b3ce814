//! NexTrip HTTP client.
//!
//! Provides async methods for the four NexTrip lookups. Each method issues
//! exactly one GET and checks status and content type before decoding.

use std::time::Duration;

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{DirectionId, RouteId, StopId};

use super::error::NexTripError;
use super::types::{NexTripDeparture, NexTripRoute, TextValuePair};

/// Default base URL for the NexTrip API.
pub const DEFAULT_BASE_URL: &str = "http://svc.metrotransit.org/NexTrip";

/// Default user agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!("nextbus/", env!("CARGO_PKG_VERSION"));

/// The four lookups the resolvers depend on.
///
/// Implemented by [`NexTripClient`] for the live API and by
/// [`MockNexTripClient`](super::MockNexTripClient) for fixtures.
#[async_trait]
pub trait NexTripApi: Send + Sync {
    /// `GET /Routes`
    async fn routes(&self) -> Result<Vec<NexTripRoute>, NexTripError>;

    /// `GET /Directions/{route}`
    async fn directions(&self, route: &RouteId) -> Result<Vec<TextValuePair>, NexTripError>;

    /// `GET /Stops/{route}/{direction}`
    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<TextValuePair>, NexTripError>;

    /// `GET /{route}/{direction}/{stop}`, soonest first.
    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<NexTripDeparture>, NexTripError>;
}

/// Configuration for the NexTrip client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexTripConfig {
    /// Base URL for the API (defaults to production NexTrip)
    pub base_url: String,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,
    /// User-Agent header value
    pub user_agent: String,
}

impl NexTripConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing or a proxy).
    ///
    /// A trailing slash is stripped so paths can be appended directly.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for NexTripConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// NexTrip API client.
#[derive(Debug, Clone)]
pub struct NexTripClient {
    http: reqwest::Client,
    base_url: String,
}

impl NexTripClient {
    /// Create a new NexTrip client with the given configuration.
    pub fn new(config: NexTripConfig) -> Result<Self, NexTripError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent);

        // A zero timeout would fail every request, so it means "none"
        if let Some(secs) = config.timeout_secs.filter(|&secs| secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode a JSON array.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NexTripError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "requesting");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            // hyper only records the phrase when it differs from the canonical one
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .and_then(|r| std::str::from_utf8(r.as_bytes()).ok());
            return Err(NexTripError::bad_status_with_reason(status, reason));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.text().await?;

        if !content_type.contains("application/json") {
            return Err(NexTripError::UnexpectedContentType(content_type));
        }

        trace!(bytes = body.len(), "response received");

        serde_json::from_str(&body).map_err(|e| NexTripError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[async_trait]
impl NexTripApi for NexTripClient {
    async fn routes(&self) -> Result<Vec<NexTripRoute>, NexTripError> {
        self.get_json("/Routes").await
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<TextValuePair>, NexTripError> {
        self.get_json(&format!("/Directions/{route}")).await
    }

    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<TextValuePair>, NexTripError> {
        self.get_json(&format!("/Stops/{route}/{direction}")).await
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<NexTripDeparture>, NexTripError> {
        self.get_json(&format!("/{route}/{direction}/{stop}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NexTripConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, Some(60));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn config_defaults() {
        let config = NexTripConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, None);
        assert!(config.user_agent.starts_with("nextbus/"));
    }

    #[test]
    fn client_creation() {
        let client = NexTripClient::new(NexTripConfig::new().with_timeout(5));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), DEFAULT_BASE_URL);
    }
}
