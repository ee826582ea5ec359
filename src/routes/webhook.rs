//! Telegram webhook endpoint

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::services::telegram::Update;
use crate::AppState;

/// POST /api/webhook/:secret - Receive one Telegram update
pub async fn telegram_webhook(
    State(state): State<Arc<AppState>>,
    Path(secret): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if secret != state.config.webhook_secret {
        tracing::warn!("Webhook called with an invalid secret");
        return Err((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "error": "Invalid webhook secret" })),
        ));
    }

    let Some(bot) = state.bot.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "Bot not configured" })),
        ));
    };

    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Webhook error: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid update payload" })),
        )
    })?;

    bot.handle_update(update).await;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
