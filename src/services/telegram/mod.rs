//! Telegram integration
//!
//! - **Client**: Bot API calls (`getUpdates`, `sendMessage`, webhooks)
//! - **Types**: serde models for updates and attachments
//! - **Bot**: command parsing and per-update handling
//!
//! Updates reach [`BotService::handle_update`] either through the webhook
//! route or through the long-polling task in `services::poller`.

pub mod bot;
pub mod client;
pub mod types;

// Re-exports for convenience
pub use bot::BotService;
pub use client::TelegramClient;
pub use types::Update;
