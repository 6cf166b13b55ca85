//! Notification delivery
//!
//! Sends rendered messages to the configured Telegram chat.

use async_trait::async_trait;
use homework_client::{Result, TelegramClient};

/// Service trait for delivering text notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message to the notification channel
    async fn send(&self, message: &str) -> Result<()>;
}

/// Telegram implementation of Notifier
pub struct TelegramNotifier {
    client: TelegramClient,
}

impl TelegramNotifier {
    /// Creates a notifier bound to one bot and one chat
    pub fn new(api_url: &str, token: &str, chat_id: &str) -> Self {
        Self {
            client: TelegramClient::with_api_url(api_url, token, chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.client.send_message(message).await
    }
}
