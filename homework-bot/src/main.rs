//! Homework Bot
//!
//! Watches a single user's homework reviews and relays status changes to a
//! Telegram chat.
//!
//! Architecture:
//! - Configuration: Secrets and endpoints from the environment (and `.env`)
//! - Repositories: Status API access
//! - Services: Notification delivery
//! - Scheduler: The fixed-period poll loop
//!
//! Every poll failure is reported to the chat and retried on the next cycle;
//! only missing configuration stops the process.

mod config;
mod repository;
mod scheduler;
mod service;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{HttpStatusRepository, StatusRepository};
use crate::scheduler::StatusPoller;
use crate::service::{Notifier, TelegramNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` may carry RUST_LOG, so it is loaded before the subscriber
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    info!("Starting Homework Bot");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("CRITICAL: {:#}", e);
            return Err(e);
        }
    };
    info!(
        "Loaded configuration: endpoint={}, chat_id={}",
        config.practicum_endpoint, config.telegram_chat_id
    );

    let statuses: Arc<dyn StatusRepository> = Arc::new(HttpStatusRepository::new(
        &config.practicum_endpoint,
        &config.practicum_token,
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram_api_url,
        &config.telegram_token,
        &config.telegram_chat_id,
    ));

    let mut poller = StatusPoller::new(
        statuses,
        notifier,
        config.retry_period,
        chrono::Utc::now().timestamp(),
    );

    poller.run().await;

    Ok(())
}

/// Log filter from RUST_LOG, falling back to info for the bot's crates
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "homework_bot=info,homework_client=info".into())
}

/// Loads and validates configuration from environment variables
fn load_config() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
