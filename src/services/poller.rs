//! Long-polling loop for Telegram updates
//!
//! Used when BOT_MODE=polling. Removes any registered webhook first
//! (Telegram refuses `getUpdates` while one is set), then loops forever.

use std::sync::Arc;
use std::time::Duration;
use tokio::time;

use crate::services::telegram::BotService;

/// Configuration for the polling task
pub struct PollingConfig {
    /// Long-poll timeout passed to `getUpdates` (seconds)
    pub timeout_secs: u64,
    /// Skip updates that queued up while the bot was down
    pub drop_pending_updates: bool,
    /// Pause after a failed `getUpdates`
    pub error_backoff: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            drop_pending_updates: true,
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// Offset to request after a batch: one past the highest update id seen
pub fn next_offset(current: Option<i64>, update_ids: &[i64]) -> Option<i64> {
    update_ids
        .iter()
        .max()
        .map(|max| max + 1)
        .max(current)
}

/// Start the polling task
///
/// This should be spawned as a background task using `tokio::spawn`.
pub async fn start_polling(bot: Arc<BotService>, config: PollingConfig) {
    tracing::info!(
        "Starting Telegram polling (timeout: {}s, drop_pending: {})",
        config.timeout_secs,
        config.drop_pending_updates
    );

    if let Err(e) = bot
        .client()
        .delete_webhook(config.drop_pending_updates)
        .await
    {
        tracing::warn!("Could not clear webhook before polling: {}", e);
    }

    let mut offset: Option<i64> = None;

    loop {
        let updates = match bot.client().get_updates(offset, config.timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!("getUpdates failed: {}", e);
                time::sleep(config.error_backoff).await;
                continue;
            }
        };

        if updates.is_empty() {
            continue;
        }

        let ids: Vec<i64> = updates.iter().map(|u| u.update_id).collect();
        offset = next_offset(offset, &ids);
        tracing::debug!("Received {} updates, next offset {:?}", ids.len(), offset);

        for update in updates {
            bot.handle_update(update).await;
        }
    }
}
