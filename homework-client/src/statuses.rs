//! Homework status API

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::info;

use crate::error::Result;

/// Production endpoint of the homework status API
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// HTTP client for the homework status API
#[derive(Clone)]
pub struct PracticumClient {
    /// Full URL of the status endpoint
    endpoint: String,
    /// OAuth token sent in the `Authorization` header
    token: String,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a client for the production endpoint
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, token)
    }

    /// Create a client for a custom endpoint
    ///
    /// # Example
    /// ```
    /// use homework_client::PracticumClient;
    ///
    /// let client = PracticumClient::with_endpoint("http://localhost:8080/statuses/", "token");
    /// assert_eq!(client.endpoint(), "http://localhost:8080/statuses/");
    /// ```
    pub fn with_endpoint(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the status endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch submission statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp used as the lower bound
    ///
    /// # Returns
    /// The decoded JSON body. Only `200 OK` counts as success.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        info!(
            "Requesting homework statuses from {} (from_date={})",
            self.endpoint, from_date
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        crate::handle_response(response, StatusCode::OK).await
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
