//! Homework status repository
//!
//! Fetches raw status responses from the homework review API.

use async_trait::async_trait;
use homework_client::{PracticumClient, Result};
use serde_json::Value;

/// Repository trait for reading submission statuses
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Fetches statuses changed since `from_date`
    ///
    /// Returns the undecoded JSON body; the caller validates its shape.
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp lower bound
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value>;
}

/// HTTP implementation of StatusRepository
pub struct HttpStatusRepository {
    client: PracticumClient,
}

impl HttpStatusRepository {
    /// Creates a new HTTP status repository
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the status endpoint
    /// * `token` - OAuth token for the API
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            client: PracticumClient::with_endpoint(endpoint, token),
        }
    }
}

#[async_trait]
impl StatusRepository for HttpStatusRepository {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value> {
        self.client.homework_statuses(from_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_statuses_passes_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("from_date", "1700000000"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "homeworks": [], "current_date": 1700000600 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let repository = HttpStatusRepository::new(&server.uri(), "token");
        let response = repository.fetch_statuses(1_700_000_000).await.unwrap();
        assert_eq!(response["current_date"], 1_700_000_600);
    }
}
