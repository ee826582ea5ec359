use serde::{Deserialize, Serialize};

/// Label used when no container format matches the filename suffix
pub const UNKNOWN_FILE_TYPE: &str = "Unknown";

/// Structured metadata extracted from a single filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub file_type: String,
    pub quality: Option<String>,
    pub resolution: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub language: Option<String>,
    pub source: Option<String>,
    pub details: FormatDetails,
}

impl AnalysisResult {
    /// Result with nothing detected
    pub fn unknown(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            file_type: UNKNOWN_FILE_TYPE.to_string(),
            quality: None,
            resolution: None,
            video_codec: None,
            audio_codec: None,
            language: None,
            source: None,
            details: FormatDetails::default(),
        }
    }
}

/// Auxiliary flags derived outside the category tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDetails {
    pub has_subtitles: bool,
    pub has_multiple_audio: bool,
    pub is_3d: bool,
    pub is_hdr: bool,
    pub year: Option<String>,
    pub season_episode: Option<String>,
}

/// File as seen by the message transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_id: String,
    pub file_name: String,
    pub file_size: Option<u64>,
    pub mime_type: Option<String>,
    pub file_unique_id: String,
}

/// How a filename reached the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// `/analyze <filename>`
    Command,
    /// Document, video or audio message
    FileUpload,
    /// Free text that looked like a filename
    TextFilename,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Command => "command",
            AnalysisSource::FileUpload => "file_upload",
            AnalysisSource::TextFilename => "text_filename",
        }
    }
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
