//! Telegram Bot API
//!
//! Sends plain-text messages via the `sendMessage` endpoint:
//! `<api_url>/bot<token>/sendMessage`

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Public Bot API base URL
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with
#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    description: Option<String>,
}

/// Bot API client bound to one bot token and one chat
#[derive(Clone)]
pub struct TelegramClient {
    api_url: String,
    token: String,
    chat_id: String,
    client: Client,
}

impl TelegramClient {
    /// Create a client for the public Bot API
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_api_url(DEFAULT_API_URL, token, chat_id)
    }

    /// Create a client for a custom Bot API server
    pub fn with_api_url(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            client: Client::new(),
        }
    }

    /// Get the Bot API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the destination chat
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send a text message to the configured chat
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        let body = response.text().await.map_err(redact_url)?;
        let reply = serde_json::from_str::<BotReply>(&body).ok();

        if !status.is_success() {
            let message = reply.and_then(|r| r.description).unwrap_or(body);
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        match reply {
            Some(BotReply { ok: true, .. }) => {
                debug!("Bot API accepted message for chat {}", self.chat_id);
                Ok(())
            }
            Some(BotReply { description, .. }) => Err(ClientError::Rejected(
                description.unwrap_or_else(|| "no description".to_string()),
            )),
            None => Err(ClientError::ParseError(format!(
                "Unexpected Bot API reply: {}",
                body
            ))),
        }
    }
}

/// The request URL embeds the bot token, so it is stripped from transport errors
fn redact_url(err: reqwest::Error) -> ClientError {
    ClientError::RequestFailed(err.without_url())
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
