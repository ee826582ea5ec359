//! Bot update handling
//!
//! Turns one Telegram update into at most one reply: commands, file
//! attachments and free text that looks like a filename all go through
//! the analyzer, get rendered, persisted and sent back.

use anyhow::Result;
use sqlx::PgPool;
use tracing::{error, info, warn};

use super::client::TelegramClient;
use super::types::{IncomingFile, Message, Update};
use crate::db::repository::{analyses, messages, NewAnalysis, NewMessage};
use crate::models::{AnalysisSource, FileMetadata};
use crate::services::analyzer::FileAnalyzer;
use crate::services::metrics;
use crate::services::renderer::{self, render, render_stats};

/// Reply formatting mode for Bot API `sendMessage`
const PARSE_MODE: &str = "Markdown";

/// Extensions that make a free-text message count as a filename
const FILENAME_HINT_EXTENSIONS: [&str; 7] = [".mkv", ".mp4", ".avi", ".webm", ".mov", ".flv", ".wmv"];

/// Parsed bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// `/analyze` with its (possibly missing) filename argument
    Analyze(Option<String>),
    Stats,
    Other(String),
}

/// Parse `/command@bot args`. Returns None for text that is not a command.
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let text = text.trim_start();
    let body = text.strip_prefix('/')?;

    let mut words = body.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest = words.collect::<Vec<_>>().join(" ");
    let name = head.split('@').next().unwrap_or(head).to_lowercase();

    let command = match name.as_str() {
        "start" => BotCommand::Start,
        "help" => BotCommand::Help,
        "analyze" => BotCommand::Analyze((!rest.is_empty()).then_some(rest)),
        "stats" => BotCommand::Stats,
        _ => BotCommand::Other(name),
    };

    Some(command)
}

/// Free text is treated as a filename when it carries a known video extension
pub fn looks_like_filename(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains('.') && FILENAME_HINT_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// Message log category
fn message_type(message: &Message) -> &'static str {
    match message.text.as_deref() {
        Some(text) if text.trim_start().starts_with('/') => "command",
        Some(_) => "text",
        None => "media",
    }
}

/// Telegram bot with its persistence and transport handles
pub struct BotService {
    pool: PgPool,
    client: TelegramClient,
    top_formats: i64,
}

impl BotService {
    pub fn new(pool: PgPool, client: TelegramClient, top_formats: i64) -> Self {
        Self {
            pool,
            client,
            top_formats,
        }
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Handle one update. Failures are logged and answered with an apology, never propagated.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            metrics::record_update("other");
            return;
        };

        let kind = message_type(&message);
        metrics::record_update(kind);
        self.log_message(&message, kind).await;

        if let Err(e) = self.dispatch(&message).await {
            error!("Error handling update {}: {:#}", update.update_id, e);
            if let Err(e) = self
                .client
                .send_message(message.chat.id, renderer::ANALYSIS_FAILED, None)
                .await
            {
                warn!("Failed to send error reply to chat {}: {}", message.chat.id, e);
            }
        }
    }

    async fn dispatch(&self, message: &Message) -> Result<()> {
        if let Some(text) = message.text.as_deref() {
            return match parse_command(text) {
                Some(command) => self.handle_command(message, command).await,
                None => self.handle_text(message, text).await,
            };
        }

        if let Some(file) = IncomingFile::from_message(message) {
            info!(
                "Received {} '{}' in chat {}",
                file.kind(),
                file.metadata().file_name,
                message.chat.id
            );
            let meta = file.metadata();
            return self
                .analyze_and_reply(message, &meta.file_name, Some(meta), AnalysisSource::FileUpload)
                .await;
        }

        Ok(())
    }

    async fn handle_command(&self, message: &Message, command: BotCommand) -> Result<()> {
        match command {
            BotCommand::Start | BotCommand::Help => {
                self.reply(message, renderer::WELCOME_MESSAGE).await
            }
            BotCommand::Analyze(Some(filename)) => {
                self.analyze_and_reply(message, &filename, None, AnalysisSource::Command)
                    .await
            }
            BotCommand::Analyze(None) => self.reply(message, renderer::ANALYZE_USAGE).await,
            BotCommand::Stats => {
                let text = match self.chat_stats(message.chat.id).await {
                    Ok((total, top)) => render_stats(total, &top),
                    Err(e) => {
                        error!("Error getting stats for chat {}: {}", message.chat.id, e);
                        renderer::STATS_UNAVAILABLE.to_string()
                    }
                };
                self.reply(message, &text).await
            }
            BotCommand::Other(name) => {
                info!("Ignoring unknown command /{} in chat {}", name, message.chat.id);
                Ok(())
            }
        }
    }

    async fn handle_text(&self, message: &Message, text: &str) -> Result<()> {
        if looks_like_filename(text) {
            self.analyze_and_reply(message, text, None, AnalysisSource::TextFilename)
                .await
        } else {
            self.reply(message, renderer::NOT_A_FILENAME).await
        }
    }

    async fn analyze_and_reply(
        &self,
        message: &Message,
        filename: &str,
        file_info: Option<&FileMetadata>,
        source: AnalysisSource,
    ) -> Result<()> {
        let analysis = FileAnalyzer::analyze(filename);
        metrics::record_analysis(source.as_str());

        self.reply(message, &render(&analysis, file_info)).await?;

        let record = NewAnalysis {
            chat_id: message.chat.id,
            username: message.username(),
            filename,
            analysis: &analysis,
            file_metadata: file_info,
            source,
        };
        // The reply already went out; a lost history row is not worth an error message
        if let Err(e) = analyses::insert(&self.pool, &record).await {
            warn!("Failed to store analysis for chat {}: {}", message.chat.id, e);
        }

        Ok(())
    }

    /// Total analyses and most common formats for a chat
    pub async fn chat_stats(&self, chat_id: i64) -> Result<(i64, Vec<(String, i64)>), sqlx::Error> {
        let total = analyses::count_by_chat(&self.pool, chat_id).await?;
        let top = analyses::top_file_types(&self.pool, chat_id, self.top_formats)
            .await?
            .into_iter()
            .map(|row| (row.file_type, row.count))
            .collect();

        Ok((total, top))
    }

    async fn log_message(&self, message: &Message, kind: &str) {
        let entry = NewMessage {
            chat_id: message.chat.id,
            username: message.username(),
            text: message.text.as_deref(),
            message_type: kind,
        };

        if let Err(e) = messages::insert(&self.pool, &entry).await {
            warn!("Failed to log message from chat {}: {}", message.chat.id, e);
        }
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<()> {
        self.client
            .send_message(message.chat.id, text, Some(PARSE_MODE))
            .await?;
        Ok(())
    }
}
