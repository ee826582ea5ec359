//! Chat-facing text for analysis results
//!
//! Output uses Telegram's legacy Markdown. Everything here is pure string
//! formatting: same input, same bytes.

use std::fmt::Write;

use crate::models::{AnalysisResult, FileMetadata};

/// Marker for quality labels without an entry in the lookup table
pub const DEFAULT_QUALITY_MARKER: &str = "🎬";

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Render an analysis as a chat reply
pub fn render(result: &AnalysisResult, file_info: Option<&FileMetadata>) -> String {
    let mut out = String::new();

    out.push_str("🎬 **File Analysis Results**\n\n");
    let _ = writeln!(out, "📁 **Filename:** `{}`", result.filename);

    if let Some(info) = file_info {
        let _ = writeln!(out, "💾 **File Size:** {}", format_file_size(info.file_size));
        if let Some(mime) = &info.mime_type {
            let _ = writeln!(out, "📋 **MIME Type:** `{}`", mime);
        }
    }

    out.push_str("\n**🔍 Detected Metadata:**\n");
    let _ = writeln!(out, "• **Format:** {}", result.file_type);

    if let Some(quality) = &result.quality {
        let _ = writeln!(out, "• **Quality:** {} {}", quality_marker(quality), quality);
    }
    if let Some(resolution) = &result.resolution {
        let _ = writeln!(out, "• **Resolution:** 📺 {}", resolution);
    }
    if let Some(codec) = &result.video_codec {
        let _ = writeln!(out, "• **Video Codec:** 🎥 {}", codec);
    }
    if let Some(codec) = &result.audio_codec {
        let _ = writeln!(out, "• **Audio Codec:** 🔊 {}", codec);
    }
    if let Some(language) = &result.language {
        let _ = writeln!(out, "• **Language:** 🌐 {}", language);
    }
    if let Some(source) = &result.source {
        let _ = writeln!(out, "• **Source:** 📺 {}", source);
    }

    let details = &result.details;
    if let Some(year) = &details.year {
        let _ = writeln!(out, "• **Year:** 📅 {}", year);
    }
    if let Some(episode) = &details.season_episode {
        let _ = writeln!(out, "• **Episode:** 📺 {}", episode);
    }
    if details.has_subtitles {
        out.push_str("• **Subtitles:** 💬 Yes\n");
    }
    if details.has_multiple_audio {
        out.push_str("• **Multi-Audio:** 🎵 Yes\n");
    }
    if details.is_3d {
        out.push_str("• **3D:** 🕶️ Yes\n");
    }
    if details.is_hdr {
        out.push_str("• **HDR:** ✨ Yes\n");
    }

    out.push_str("\n_Analysis completed successfully!_ ✅");
    out
}

/// Decorative marker for a quality label
pub fn quality_marker(quality: &str) -> &'static str {
    match quality {
        "CAM" => "📷",
        "TS" => "📽️",
        "DVDRip" => "💿",
        "BluRay" => "💎",
        "WEB-DL" | "WEBRip" => "🌐",
        "HDTV" => "📺",
        "UHD" => "👑",
        "REMUX" => "✨",
        _ => DEFAULT_QUALITY_MARKER,
    }
}

/// Human-scaled size, 1024 per step. Missing or zero size is "Unknown".
pub fn format_file_size(size_bytes: Option<u64>) -> String {
    let mut size = match size_bytes {
        Some(bytes) if bytes > 0 => bytes as f64,
        _ => return "Unknown".to_string(),
    };

    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} PB", size)
}

/// Per-chat statistics reply
pub fn render_stats(total: i64, top_formats: &[(String, i64)]) -> String {
    let mut out = String::from("📊 **Your Analysis Stats**\n\n");
    let _ = writeln!(out, "🔢 **Total Files Analyzed:** {}\n", total);

    if top_formats.is_empty() {
        out.push_str("No analyses yet. Send me some files to analyze!");
    } else {
        out.push_str("📁 **Most Common Formats:**\n");
        for (file_type, count) in top_formats {
            let _ = writeln!(out, "• {}: {} files", file_type, count);
        }
    }

    out
}

pub const WELCOME_MESSAGE: &str = "🤖 **Welcome to File Metadata Analyzer Bot!**

I can analyze Telegram files and extract detailed metadata including:
• File format (MKV, MP4, AVI, etc.)
• Quality (BluRay, WEB-DL, DVDRip, etc.)
• Resolution (4K, 1080p, 720p, etc.)
• Video/Audio codecs (H.264, H.265, AAC, etc.)
• Source platform (Netflix, Amazon Prime, etc.)
• Language and subtitle information

**How to use:**
1. Forward any file to me
2. Send a file directly
3. Use `/analyze filename.mkv` with any filename

**Commands:**
/start - Show this help message
/analyze <filename> - Analyze a specific filename
/stats - Show your analysis history

Just send me any file and I'll analyze it! 📁✨";

pub const ANALYZE_USAGE: &str =
    "Please provide a filename. Example:\n`/analyze Movie.2023.1080p.BluRay.x264.mkv`";

pub const NOT_A_FILENAME: &str = "🤔 I didn't recognize that as a filename.\n\n\
Try:\n\
• Sending a file directly\n\
• Using `/analyze filename.mkv`\n\
• Type `/help` for more info";

pub const ANALYSIS_FAILED: &str = "Sorry, there was an error analyzing this file. Please try again.";

pub const STATS_UNAVAILABLE: &str = "Sorry, couldn't retrieve your stats right now.";
