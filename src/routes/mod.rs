pub mod analyze;
pub mod health;
pub mod stats;
pub mod webhook;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Build the HTTP router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints
        .route("/", get(health::root))
        .route("/api/health", get(health::api_health))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        // Telegram webhook
        .route("/api/webhook/:secret", post(webhook::telegram_webhook))
        // Analysis
        .route("/api/analyze-file", post(analyze::analyze_file))
        // Statistics
        .route("/api/stats", get(stats::get_bot_stats))
        .route("/api/chats/:chat_id/stats", get(stats::get_chat_stats))
        .route("/api/chats/:chat_id/history", get(stats::get_chat_history))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
