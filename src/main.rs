mod config;
mod db;
mod models;
mod routes;
mod services;

use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{BotMode, Config};
use crate::db::{create_lazy_pool, create_pool, migrate_until_ready, run_migrations};
use crate::services::poller::{start_polling, PollingConfig};
use crate::services::telegram::{BotService, TelegramClient};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    /// Present when a Telegram token is configured and BOT_MODE is not `off`
    pub bot: Option<Arc<BotService>>,
    /// Set once migrations have been applied; inserts fail until then
    pub schema_ready: Arc<AtomicBool>,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_analyzer_bot=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting File Analyzer Bot v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app_env);

    // Initialize PostgreSQL connection pool. Analysis works without it,
    // so an unreachable database only disables history and stats until
    // the background task manages to migrate.
    let schema_ready = Arc::new(AtomicBool::new(false));
    let pool = match create_pool(&config).await {
        Ok(pool) => {
            run_migrations(&pool).await?;
            schema_ready.store(true, Ordering::Release);
            tracing::info!("Database migrations completed");
            pool
        }
        Err(e) => {
            tracing::error!("PostgreSQL unavailable, continuing without history: {}", e);
            let pool = create_lazy_pool(&config)?;
            tokio::spawn(migrate_until_ready(
                pool.clone(),
                schema_ready.clone(),
                Duration::from_secs(2),
            ));
            pool
        }
    };

    // Telegram bot (optional)
    let bot = init_bot(&config, &pool).await?;

    // Build application state
    let state = Arc::new(AppState {
        config,
        pool,
        bot,
        schema_ready,
        start_time: Instant::now(),
    });

    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the bot service and start whichever update delivery BOT_MODE asks for
async fn init_bot(config: &Config, pool: &PgPool) -> anyhow::Result<Option<Arc<BotService>>> {
    let Some(token) = config.telegram_token.as_deref() else {
        tracing::warn!("No Telegram bot token provided, bot features disabled");
        return Ok(None);
    };
    if !config.bot_enabled() {
        tracing::info!("BOT_MODE=off, bot features disabled");
        return Ok(None);
    }

    let client = TelegramClient::new(&config.telegram_api_url, token)?;
    match client.get_me().await {
        Ok(me) => tracing::info!(
            "Telegram bot initialized: @{}",
            me.username.as_deref().unwrap_or("unknown")
        ),
        Err(e) => tracing::error!("Failed to verify Telegram token: {}", e),
    }

    let bot = Arc::new(BotService::new(
        pool.clone(),
        client,
        config.stats_top_formats,
    ));

    match config.bot_mode {
        BotMode::Polling => {
            let polling = PollingConfig {
                timeout_secs: config.poll_timeout_secs,
                drop_pending_updates: config.drop_pending_updates,
                error_backoff: Duration::from_secs(5),
            };
            tokio::spawn(start_polling(bot.clone(), polling));
            tracing::info!("Polling task started");
        }
        BotMode::Webhook => {
            if let Some(base) = &config.webhook_url {
                let url = format!(
                    "{}/api/webhook/{}",
                    base.trim_end_matches('/'),
                    config.webhook_secret
                );
                match bot.client().set_webhook(&url).await {
                    Ok(_) => tracing::info!("Webhook registered"),
                    Err(e) => tracing::error!("Failed to register webhook: {}", e),
                }
            } else {
                tracing::info!("WEBHOOK_URL not set, expecting an externally registered webhook");
            }
        }
        BotMode::Off => {}
    }

    Ok(Some(bot))
}
