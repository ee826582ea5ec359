use std::env;

/// How the bot receives Telegram updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Telegram pushes updates to `/api/webhook/:secret`
    Webhook,
    /// Background task long-polls `getUpdates`
    Polling,
    /// HTTP API only
    Off,
}

impl BotMode {
    /// Parse a mode name; anything unrecognized falls back to webhook
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "polling" | "poll" => BotMode::Polling,
            "off" | "disabled" | "none" => BotMode::Off,
            _ => BotMode::Webhook,
        }
    }
}

impl std::fmt::Display for BotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotMode::Webhook => write!(f, "webhook"),
            BotMode::Polling => write!(f, "polling"),
            BotMode::Off => write!(f, "off"),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub app_env: String,

    // PostgreSQL
    pub database_url: String,
    pub db_max_connections: u32,

    // Telegram
    pub telegram_token: Option<String>,
    pub telegram_api_url: String,
    pub webhook_secret: String,
    pub webhook_url: Option<String>,
    pub bot_mode: BotMode,
    pub poll_timeout_secs: u64,
    pub drop_pending_updates: bool,

    // Stats / history
    pub stats_top_formats: i64,
    pub history_max_limit: i64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()
                .unwrap_or(8001),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            // PostgreSQL
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/telegram_bot".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // Telegram
            telegram_token: env::var("TELEGRAM_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            webhook_secret: env::var("WEBHOOK_SECRET")
                .unwrap_or_else(|_| "telegram_bot_webhook_secret_2025".to_string()),
            webhook_url: env::var("WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            bot_mode: BotMode::parse(&env::var("BOT_MODE").unwrap_or_default()),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            drop_pending_updates: env::var("DROP_PENDING_UPDATES")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),

            // Stats / history
            stats_top_formats: env::var("STATS_TOP_FORMATS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            history_max_limit: env::var("HISTORY_MAX_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        }
    }

    /// Whether the Telegram side should be started at all
    pub fn bot_enabled(&self) -> bool {
        self.telegram_token.is_some() && self.bot_mode != BotMode::Off
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_mode_parse() {
        assert_eq!(BotMode::parse("polling"), BotMode::Polling);
        assert_eq!(BotMode::parse(" POLL "), BotMode::Polling);
        assert_eq!(BotMode::parse("off"), BotMode::Off);
        assert_eq!(BotMode::parse("webhook"), BotMode::Webhook);
        assert_eq!(BotMode::parse(""), BotMode::Webhook);
        assert_eq!(BotMode::Polling.to_string(), "polling");
    }

    #[test]
    fn test_bot_enabled_requires_token() {
        let mut config = Config::from_env();
        config.telegram_token = None;
        config.bot_mode = BotMode::Polling;
        assert!(!config.bot_enabled());

        config.telegram_token = Some("123:abc".to_string());
        assert!(config.bot_enabled());

        config.bot_mode = BotMode::Off;
        assert!(!config.bot_enabled());
    }
}
