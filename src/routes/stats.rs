//! Usage statistics and per-chat history

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::repository::{analyses, messages};
use crate::db::{AnalysisRecord, FileTypeCount};
use crate::AppState;

/// Overall bot statistics
#[derive(Serialize)]
pub struct BotStatsResponse {
    pub total_users: i64,
    pub total_analyses: i64,
    pub status: &'static str,
}

/// GET /api/stats - Overall bot statistics
pub async fn get_bot_stats(State(state): State<Arc<AppState>>) -> Response {
    let totals = async {
        let users = messages::count_distinct_chats(&state.pool).await?;
        let total = analyses::count_all(&state.pool).await?;
        Ok::<_, sqlx::Error>((users, total))
    };

    match totals.await {
        Ok((total_users, total_analyses)) => Json(BotStatsResponse {
            total_users,
            total_analyses,
            status: "active",
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Stats error: {}", e);
            Json(serde_json::json!({ "error": "Could not retrieve stats" })).into_response()
        }
    }
}

/// Per-chat statistics
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStatsResponse {
    pub chat_id: i64,
    pub total_analyses: i64,
    pub top_formats: Vec<FileTypeCount>,
}

/// GET /api/chats/:chat_id/stats - Analysis count and most common formats for a chat
pub async fn get_chat_stats(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let total_analyses = analyses::count_by_chat(&state.pool, chat_id)
        .await
        .map_err(internal_error("Failed to count analyses"))?;

    let top_formats = analyses::top_file_types(&state.pool, chat_id, state.config.stats_top_formats)
        .await
        .map_err(internal_error("Failed to aggregate formats"))?;

    Ok(Json(ChatStatsResponse {
        chat_id,
        total_analyses,
        top_formats,
    }))
}

/// Query params for history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Response for history
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub items: Vec<AnalysisRecord>,
    pub total: usize,
}

/// GET /api/chats/:chat_id/history - Recent analyses for a chat
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let limit = query.limit.clamp(1, state.config.history_max_limit.max(1));

    let rows = analyses::recent_by_chat(&state.pool, chat_id, limit)
        .await
        .map_err(internal_error("Failed to load history"))?;

    let items: Vec<AnalysisRecord> = rows.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(HistoryResponse { items, total }))
}

fn internal_error(
    message: &'static str,
) -> impl Fn(sqlx::Error) -> (StatusCode, Json<serde_json::Value>) {
    move |e| {
        tracing::error!("{}: {}", message, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": message })),
        )
    }
}
