//! Inbound message log
//!
//! Every Telegram message the bot sees is recorded here; `/api/stats`
//! derives its user count from the distinct chats in this table.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Message to log
#[derive(Debug, Clone)]
pub struct NewMessage<'a> {
    pub chat_id: i64,
    pub username: Option<&'a str>,
    pub text: Option<&'a str>,
    /// `command`, `text` or `media`
    pub message_type: &'a str,
}

/// Insert a message log entry
pub async fn insert(pool: &PgPool, message: &NewMessage<'_>) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO messages (id, chat_id, username, text, message_type, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(message.chat_id)
    .bind(message.username)
    .bind(message.text)
    .bind(message.message_type)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Number of distinct chats that ever talked to the bot
pub async fn count_distinct_chats(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT chat_id) FROM messages")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
