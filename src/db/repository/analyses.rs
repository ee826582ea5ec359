//! Analysis history repository
//!
//! One row per analyzed filename, keyed by the Telegram chat that asked.
//! `file_type` is stored next to the JSONB payload so the per-chat
//! aggregation does not have to reach into the document.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{AnalysisRow, FileTypeCount};
use crate::models::{AnalysisResult, AnalysisSource, FileMetadata};

/// Analysis event to persist
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub chat_id: i64,
    pub username: Option<&'a str>,
    pub filename: &'a str,
    pub analysis: &'a AnalysisResult,
    pub file_metadata: Option<&'a FileMetadata>,
    pub source: AnalysisSource,
}

/// Insert an analysis event, returning its generated id
pub async fn insert(pool: &PgPool, record: &NewAnalysis<'_>) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO analyses (id, chat_id, username, filename, file_type, analysis, file_metadata, source, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(record.chat_id)
    .bind(record.username)
    .bind(record.filename)
    .bind(&record.analysis.file_type)
    .bind(Json(record.analysis))
    .bind(record.file_metadata.map(Json))
    .bind(record.source.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Count analyses for a chat
pub async fn count_by_chat(pool: &PgPool, chat_id: i64) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM analyses WHERE chat_id = $1")
        .bind(chat_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Count all analyses
pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM analyses")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// Most frequent file types for a chat.
/// Ties are ordered by file type so repeated calls agree.
pub async fn top_file_types(
    pool: &PgPool,
    chat_id: i64,
    limit: i64,
) -> Result<Vec<FileTypeCount>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FileTypeCount>(
        r#"
        SELECT file_type, COUNT(*) AS count
        FROM analyses
        WHERE chat_id = $1
        GROUP BY file_type
        ORDER BY count DESC, file_type ASC
        LIMIT $2
        "#,
    )
    .bind(chat_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Recent analyses for a chat, newest first
pub async fn recent_by_chat(
    pool: &PgPool,
    chat_id: i64,
    limit: i64,
) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        r#"
        SELECT id, chat_id, username, filename, file_type, analysis, file_metadata, source, created_at
        FROM analyses
        WHERE chat_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(chat_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
