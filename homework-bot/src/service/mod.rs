//! Service layer
//!
//! Outbound side effects of the poller. Trait-based to enable testing and
//! dependency injection.

mod notifier;

pub use notifier::Notifier;
pub use notifier::TelegramNotifier;
