//! SerpApi HTTP client
//!
//! One GET per search, no retries: callers convert failures into
//! empty-result-with-note outcomes instead of hammering the API.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::flights::{FlightQuery, FlightResponse};
use crate::hotels::{HotelQuery, HotelResponse};

/// Errors from the SerpApi boundary
#[derive(Debug, Error)]
pub enum SearchError {
    /// SerpApi returned a non-success status or an error payload
    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level failure (connection, TLS, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("invalid search response: {0}")]
    InvalidResponse(String),
}

/// Client for SerpApi search engines
pub struct SerpClient {
    http: Client,
    api_key: String,
    base_url: String,
    currency: String,
    language: String,
}

impl SerpClient {
    /// Create a client for the given API key and endpoint
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            currency: "USD".to_string(),
            language: "en".to_string(),
        })
    }

    /// Override the result currency (default USD)
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override the result language (default en)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Search round-trip flights via the `google_flights` engine
    pub async fn google_flights(&self, query: &FlightQuery) -> Result<FlightResponse, SearchError> {
        debug!(
            source = %query.source,
            destination = %query.destination,
            outbound = %query.outbound_date,
            "google_flights: called"
        );
        let value = self.get(query.params()).await?;
        serde_json::from_value(value).map_err(|e| SearchError::InvalidResponse(e.to_string()))
    }

    /// Search hotels via the `google_hotels` engine
    pub async fn google_hotels(&self, query: &HotelQuery) -> Result<HotelResponse, SearchError> {
        debug!(
            place = %query.place,
            check_in = %query.check_in_date,
            adults = %query.adults,
            band = ?query.price_band,
            "google_hotels: called"
        );
        let value = self.get(query.params()).await?;
        serde_json::from_value(value).map_err(|e| SearchError::InvalidResponse(e.to_string()))
    }

    /// Issue a GET against `/search.json` with engine params plus the
    /// common currency/language/credential params.
    async fn get(&self, mut params: Vec<(&'static str, String)>) -> Result<serde_json::Value, SearchError> {
        params.push(("currency", self.currency.clone()));
        params.push(("hl", self.language.clone()));
        params.push(("api_key", self.api_key.clone()));

        let url = format!("{}/search.json", self.base_url);
        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status, "get: search request failed");
            return Err(SearchError::Api { status, message });
        }

        let value: serde_json::Value = response.json().await?;

        // SerpApi reports engine-level failures as an `error` field in a
        // 200 response.
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            warn!(message, "get: search API reported an error payload");
            return Err(SearchError::Api {
                status,
                message: message.to_string(),
            });
        }

        debug!("get: success");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> SerpClient {
        SerpClient::new("test-key", "https://serpapi.test", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_defaults() {
        let client = test_client();
        assert_eq!(client.currency, "USD");
        assert_eq!(client.language, "en");
        assert_eq!(client.base_url, "https://serpapi.test");
    }

    #[test]
    fn test_client_overrides() {
        let client = test_client().with_currency("EUR").with_language("fr");
        assert_eq!(client.currency, "EUR");
        assert_eq!(client.language, "fr");
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("Invalid API key"));
    }
}
