//! Telegram Bot API types
//!
//! Only the fields the bot reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

use crate::models::FileMetadata;

/// Bot API response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Incoming update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    pub document: Option<Document>,
    pub video: Option<Video>,
    pub audio: Option<Audio>,
}

impl Message {
    pub fn username(&self) -> Option<&str> {
        self.from.as_ref().and_then(|user| user.username.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_name: Option<String>,
    pub title: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

/// `sendMessage` parameters
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
}

/// `getUpdates` parameters
#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

/// Telegram sends `""` for some unnamed uploads; treat it like a missing name
fn non_empty(name: &Option<String>) -> Option<String> {
    name.as_deref().filter(|n| !n.is_empty()).map(str::to_string)
}

/// A file attached to a message, reduced to the shape the analyzer renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingFile {
    Document(FileMetadata),
    Video(FileMetadata),
    Audio(FileMetadata),
}

impl IncomingFile {
    /// Pick the attachment of a message. Document wins over video, video over audio.
    pub fn from_message(message: &Message) -> Option<Self> {
        if let Some(doc) = &message.document {
            return Some(IncomingFile::Document(FileMetadata {
                file_id: doc.file_id.clone(),
                file_name: non_empty(&doc.file_name).unwrap_or_else(|| "Unknown".to_string()),
                file_size: doc.file_size,
                mime_type: doc.mime_type.clone(),
                file_unique_id: doc.file_unique_id.clone(),
            }));
        }

        if let Some(video) = &message.video {
            return Some(IncomingFile::Video(FileMetadata {
                file_id: video.file_id.clone(),
                file_name: non_empty(&video.file_name)
                    .unwrap_or_else(|| "Unknown Video".to_string()),
                file_size: video.file_size,
                mime_type: video.mime_type.clone(),
                file_unique_id: video.file_unique_id.clone(),
            }));
        }

        message.audio.as_ref().map(|audio| {
            IncomingFile::Audio(FileMetadata {
                file_id: audio.file_id.clone(),
                file_name: non_empty(&audio.file_name)
                    .or_else(|| non_empty(&audio.title))
                    .unwrap_or_else(|| "Unknown Audio".to_string()),
                file_size: audio.file_size,
                mime_type: audio.mime_type.clone(),
                file_unique_id: audio.file_unique_id.clone(),
            })
        })
    }

    pub fn metadata(&self) -> &FileMetadata {
        match self {
            IncomingFile::Document(meta) | IncomingFile::Video(meta) | IncomingFile::Audio(meta) => {
                meta
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IncomingFile::Document(_) => "document",
            IncomingFile::Video(_) => "video",
            IncomingFile::Audio(_) => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_message(json: &str) -> Message {
        serde_json::from_str(json).expect("valid message json")
    }

    #[test]
    fn test_update_deserialize() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 10,
                "message": {
                    "message_id": 5,
                    "date": 1700000000,
                    "chat": {"id": -100, "type": "private"},
                    "from": {"id": 7, "is_bot": false, "first_name": "Ann", "username": "ann"},
                    "text": "/analyze Movie.mkv"
                }
            }"#,
        )
        .unwrap();

        let message = update.message.unwrap();
        assert_eq!(update.update_id, 10);
        assert_eq!(message.chat.id, -100);
        assert_eq!(message.username(), Some("ann"));
        assert_eq!(message.text.as_deref(), Some("/analyze Movie.mkv"));
    }

    #[test]
    fn test_update_without_message() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 11, "edited_message": {"foo": 1}}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_incoming_document_wins() {
        let message = parse_message(
            r#"{
                "message_id": 1,
                "chat": {"id": 1},
                "document": {"file_id": "d", "file_unique_id": "du", "file_name": "Movie.mkv", "file_size": 1536},
                "video": {"file_id": "v", "file_unique_id": "vu", "file_name": "Clip.mp4"}
            }"#,
        );

        let file = IncomingFile::from_message(&message).unwrap();
        assert_eq!(file.kind(), "document");
        assert_eq!(file.metadata().file_name, "Movie.mkv");
        assert_eq!(file.metadata().file_size, Some(1536));
    }

    #[test]
    fn test_incoming_name_fallbacks() {
        let message = parse_message(
            r#"{"message_id": 1, "chat": {"id": 1}, "document": {"file_id": "d", "file_unique_id": "du"}}"#,
        );
        assert_eq!(IncomingFile::from_message(&message).unwrap().metadata().file_name, "Unknown");

        let message = parse_message(
            r#"{"message_id": 1, "chat": {"id": 1}, "video": {"file_id": "v", "file_unique_id": "vu"}}"#,
        );
        assert_eq!(
            IncomingFile::from_message(&message).unwrap().metadata().file_name,
            "Unknown Video"
        );

        let message = parse_message(
            r#"{"message_id": 1, "chat": {"id": 1}, "audio": {"file_id": "a", "file_unique_id": "au", "title": "Song.FLAC"}}"#,
        );
        let file = IncomingFile::from_message(&message).unwrap();
        assert_eq!(file.kind(), "audio");
        assert_eq!(file.metadata().file_name, "Song.FLAC");

        let message = parse_message(
            r#"{"message_id": 1, "chat": {"id": 1}, "audio": {"file_id": "a", "file_unique_id": "au"}}"#,
        );
        assert_eq!(
            IncomingFile::from_message(&message).unwrap().metadata().file_name,
            "Unknown Audio"
        );
    }

    #[test]
    fn test_incoming_empty_names_fall_back() {
        let name_of = |json: &str| {
            IncomingFile::from_message(&parse_message(json))
                .unwrap()
                .metadata()
                .file_name
                .clone()
        };

        assert_eq!(
            name_of(r#"{"message_id": 1, "chat": {"id": 1}, "document": {"file_id": "d", "file_unique_id": "du", "file_name": ""}}"#),
            "Unknown"
        );
        assert_eq!(
            name_of(r#"{"message_id": 1, "chat": {"id": 1}, "video": {"file_id": "v", "file_unique_id": "vu", "file_name": ""}}"#),
            "Unknown Video"
        );
        assert_eq!(
            name_of(r#"{"message_id": 1, "chat": {"id": 1}, "audio": {"file_id": "a", "file_unique_id": "au", "file_name": "", "title": "Track One"}}"#),
            "Track One"
        );
        assert_eq!(
            name_of(r#"{"message_id": 1, "chat": {"id": 1}, "audio": {"file_id": "a", "file_unique_id": "au", "file_name": "", "title": ""}}"#),
            "Unknown Audio"
        );
    }

    #[test]
    fn test_text_message_has_no_file() {
        let message = parse_message(r#"{"message_id": 1, "chat": {"id": 1}, "text": "hi"}"#);
        assert!(IncomingFile::from_message(&message).is_none());
    }

    #[test]
    fn test_send_message_params_skip_parse_mode() {
        let params = SendMessageParams {
            chat_id: 5,
            text: "hello",
            parse_mode: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["chat_id"], 5);
        assert!(value.get("parse_mode").is_none());
    }
}
