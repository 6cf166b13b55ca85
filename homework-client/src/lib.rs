//! Homework HTTP Clients
//!
//! Thin, typed HTTP clients used by the homework status bot:
//! - [`PracticumClient`] fetches submission statuses from the review API
//! - [`TelegramClient`] delivers text messages to a single chat
//!
//! Neither client interprets the payloads it moves; shape checks live in
//! `homework-core`.
//!
//! # Example
//!
//! ```no_run
//! use homework_client::{PracticumClient, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let practicum = PracticumClient::new("practicum-token");
//!     let telegram = TelegramClient::new("bot-token", "123456");
//!
//!     let statuses = practicum.homework_statuses(0).await?;
//!     telegram.send_message(&statuses.to_string()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod statuses;
mod telegram;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use statuses::{DEFAULT_ENDPOINT, PracticumClient};
pub use telegram::{DEFAULT_API_URL, TelegramClient};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Handle an API response that must answer with exactly `expected`
///
/// Any other status yields [`ClientError::ApiError`] carrying the body text;
/// an undecodable body yields [`ClientError::ParseError`].
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();

    if status != expected {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
