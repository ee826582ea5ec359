//! Telegram Bot API client
//!
//! Thin reqwest wrapper over the handful of Bot API methods the bot uses.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use super::types::*;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const LONG_POLL_GRACE_SECS: u64 = 10;

/// Telegram client error types
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("Telegram API error ({code:?}): {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty result")]
    EmptyResult,
}

/// Bot API client bound to one bot token
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token from BotFather
    pub fn new(api_url: &str, token: &str) -> Result<Self, TelegramError> {
        let base_url = format!("{}/bot{}", api_url.trim_end_matches('/'), token);

        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// POST a method call with JSON parameters
    async fn call<P, T>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Telegram API request: {}", method);

        let mut request = self.http.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        parse_response(method, status, &text)
    }

    /// Bot identity, used as a startup token check
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message"],
        };
        let timeout = Duration::from_secs(timeout_secs + LONG_POLL_GRACE_SECS);
        self.call("getUpdates", &params, Some(timeout)).await
    }

    /// Send a text message
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<Message, TelegramError> {
        let params = SendMessageParams {
            chat_id,
            text,
            parse_mode,
        };
        self.call("sendMessage", &params, None).await
    }

    /// Register the webhook URL
    pub async fn set_webhook(&self, url: &str) -> Result<bool, TelegramError> {
        self.call(
            "setWebhook",
            &serde_json::json!({ "url": url, "allowed_updates": ["message"] }),
            None,
        )
        .await
    }

    /// Remove the webhook so `getUpdates` works, optionally dropping the backlog
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, TelegramError> {
        self.call(
            "deleteWebhook",
            &serde_json::json!({ "drop_pending_updates": drop_pending_updates }),
            None,
        )
        .await
    }
}

/// Decode a Bot API envelope. Error envelopes come back with non-2xx statuses,
/// so the body is checked before the status.
fn parse_response<T: DeserializeOwned>(
    method: &str,
    status: u16,
    text: &str,
) -> Result<T, TelegramError> {
    let envelope: TelegramResponse<T> = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            if !(200..300).contains(&status) {
                return Err(TelegramError::Http(status));
            }
            error!("Failed to parse Telegram response for '{}': {}", method, e);
            return Err(TelegramError::Parse(e.to_string()));
        }
    };

    if !envelope.ok {
        return Err(TelegramError::Api {
            code: envelope.error_code,
            description: envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    envelope.result.ok_or(TelegramError::EmptyResult)
}
