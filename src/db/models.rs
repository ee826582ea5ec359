//! Database row types for PostgreSQL
//!
//! These map directly to rows of the `analyses` table and convert to the
//! API response shapes served under `/api/chats`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{AnalysisResult, FileMetadata};

/// Stored analysis event
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub chat_id: i64,
    pub username: Option<String>,
    pub filename: String,
    pub file_type: String,
    pub analysis: Json<AnalysisResult>,
    pub file_metadata: Option<Json<FileMetadata>>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated count of one file type within a chat
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeCount {
    pub file_type: String,
    pub count: i64,
}

/// API view of a stored analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub chat_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub filename: String,
    pub file_type: String,
    pub analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_metadata: Option<FileMetadata>,
    pub source: String,
    pub timestamp: i64, // milliseconds
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id,
            chat_id: row.chat_id,
            username: row.username,
            filename: row.filename,
            file_type: row.file_type,
            analysis: row.analysis.0,
            file_metadata: row.file_metadata.map(|m| m.0),
            source: row.source,
            timestamp: row.created_at.timestamp_millis(),
        }
    }
}
