//! Pattern catalog for filename classification
//!
//! One ordered table per category. Table order is the tie-break rule:
//! several patterns overlap on purpose (CAM/CAMRip, WEB-DL/WEBRip/WEB,
//! BDRip/BluRay, UHD in both quality and resolution) and the first rule
//! that matches wins.

use lazy_static::lazy_static;
use regex::Regex;

/// A label and the pattern that selects it
#[derive(Debug)]
pub struct ClassificationRule {
    pub label: &'static str,
    pub matcher: Regex,
}

impl ClassificationRule {
    /// Compile a case-insensitive rule. Patterns are static, so a bad one is a programming error.
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            matcher: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.matcher.is_match(haystack)
    }
}

/// Semantic category of a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Format,
    Quality,
    Resolution,
    VideoCodec,
    AudioCodec,
    Language,
    Source,
}

impl Category {
    /// All categories in evaluation order
    #[cfg(test)]
    pub const ALL: [Category; 7] = [
        Category::Format,
        Category::Quality,
        Category::Resolution,
        Category::VideoCodec,
        Category::AudioCodec,
        Category::Language,
        Category::Source,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Format => "format",
            Category::Quality => "quality",
            Category::Resolution => "resolution",
            Category::VideoCodec => "video_codec",
            Category::AudioCodec => "audio_codec",
            Category::Language => "language",
            Category::Source => "source",
        }
    }

    /// Rules of this category in precedence order
    pub fn rules(&self) -> &'static [ClassificationRule] {
        match self {
            Category::Format => &FORMAT_RULES,
            Category::Quality => &QUALITY_RULES,
            Category::Resolution => &RESOLUTION_RULES,
            Category::VideoCodec => &VIDEO_CODEC_RULES,
            Category::AudioCodec => &AUDIO_CODEC_RULES,
            Category::Language => &LANGUAGE_RULES,
            Category::Source => &SOURCE_RULES,
        }
    }

    /// Labels this category can produce
    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.rules().iter().map(|rule| rule.label)
    }

    /// First rule (in table order) whose matcher hits the haystack
    pub fn first_match(&self, haystack: &str) -> Option<&'static str> {
        self.rules()
            .iter()
            .find(|rule| rule.is_match(haystack))
            .map(|rule| rule.label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

lazy_static! {
    // ============ CONTAINER FORMAT (suffix only) ============
    static ref FORMAT_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("MKV", r"\.mkv$"),
        ClassificationRule::new("MP4", r"\.mp4$"),
        ClassificationRule::new("AVI", r"\.avi$"),
        ClassificationRule::new("WMV", r"\.wmv$"),
        ClassificationRule::new("FLV", r"\.flv$"),
        ClassificationRule::new("MOV", r"\.mov$"),
        ClassificationRule::new("M4V", r"\.m4v$"),
        ClassificationRule::new("WebM", r"\.webm$"),
        ClassificationRule::new("OGV", r"\.ogv$"),
        ClassificationRule::new("MTS", r"\.mts$"),
        ClassificationRule::new("M2TS", r"\.m2ts$"),
        ClassificationRule::new("TS", r"\.ts$"),
        ClassificationRule::new("MPG", r"\.(mpg|mpeg)$"),
        ClassificationRule::new("VOB", r"\.vob$"),
        ClassificationRule::new("ASF", r"\.asf$"),
        ClassificationRule::new("3GP", r"\.3gp$"),
    ];

    // ============ RELEASE QUALITY ============
    static ref QUALITY_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("CAM", r"\b(cam|camrip|cam-rip)\b"),
        ClassificationRule::new("CAMRip", r"\b(camrip|cam-rip)\b"),
        ClassificationRule::new("TS", r"\b(ts|telesync|tele-sync)\b"),
        ClassificationRule::new("TC", r"\b(tc|telecine|tele-cine)\b"),
        ClassificationRule::new("WP", r"\b(wp|workprint|work-print)\b"),
        ClassificationRule::new("DVDScr", r"\b(dvdscr|dvd-scr|dvdscreener)\b"),
        ClassificationRule::new("R5", r"\br5\b"),
        ClassificationRule::new("DVDRip", r"\b(dvdrip|dvd-rip)\b"),
        ClassificationRule::new("BDRip", r"\b(bdrip|bd-rip|bluray-rip)\b"),
        ClassificationRule::new("BRRip", r"\b(brrip|br-rip)\b"),
        ClassificationRule::new("HDRip", r"\b(hdrip|hd-rip)\b"),
        ClassificationRule::new("HDTV", r"\b(hdtv|hd-tv)\b"),
        ClassificationRule::new("PDTV", r"\b(pdtv|pd-tv)\b"),
        ClassificationRule::new("DSRip", r"\b(dsrip|ds-rip)\b"),
        ClassificationRule::new("WEB-DL", r"\b(web-dl|webdl|web\.dl)\b"),
        ClassificationRule::new("WEBRip", r"\b(webrip|web-rip|web\.rip)\b"),
        // `\b` after "web" already rejects webrip/webdl
        ClassificationRule::new("WEB", r"\bweb\b"),
        ClassificationRule::new("BluRay", r"\b(bluray|blu-ray|bdrip|bdremux)\b"),
        ClassificationRule::new("UHD", r"\b(uhd|ultra\.hd|4k\.uhd)\b"),
        ClassificationRule::new("REMUX", r"\b(remux|re-mux)\b"),
        ClassificationRule::new("REPACK", r"\b(repack|re-pack)\b"),
        ClassificationRule::new("PROPER", r"\bproper\b"),
        ClassificationRule::new("REAL", r"\breal\b"),
        ClassificationRule::new("RETAIL", r"\bretail\b"),
        ClassificationRule::new("UNCUT", r"\buncut\b"),
        ClassificationRule::new("EXTENDED", r"\b(extended|ext)\b"),
        ClassificationRule::new("REMASTERED", r"\b(remastered|remaster)\b"),
    ];

    // ============ RESOLUTION ============
    static ref RESOLUTION_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("4K", r"\b(4k|2160p|uhd|ultra\.hd)\b"),
        ClassificationRule::new("2K", r"\b(2k|1440p)\b"),
        ClassificationRule::new("1080p", r"\b(1080p|1080i|full\.hd|fullhd)\b"),
        ClassificationRule::new("720p", r"\b(720p|720i|hd)\b"),
        ClassificationRule::new("576p", r"\b(576p|576i)\b"),
        ClassificationRule::new("480p", r"\b(480p|480i|sd)\b"),
        ClassificationRule::new("360p", r"\b360p\b"),
        ClassificationRule::new("240p", r"\b240p\b"),
    ];

    // ============ VIDEO CODEC ============
    static ref VIDEO_CODEC_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("H.264", r"\b(h\.?264|x264|avc)\b"),
        ClassificationRule::new("H.265", r"\b(h\.?265|x265|hevc)\b"),
        ClassificationRule::new("VP9", r"\bvp9\b"),
        ClassificationRule::new("VP8", r"\bvp8\b"),
        ClassificationRule::new("XviD", r"\bxvid\b"),
        ClassificationRule::new("DivX", r"\bdivx\b"),
        ClassificationRule::new("AV1", r"\bav1\b"),
    ];

    // ============ AUDIO CODEC ============
    static ref AUDIO_CODEC_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("AAC", r"\baac\b"),
        ClassificationRule::new("AC3", r"\b(ac3|ac-3)\b"),
        ClassificationRule::new("DTS", r"\b(dts|dts-hd)\b"),
        ClassificationRule::new("MP3", r"\bmp3\b"),
        ClassificationRule::new("FLAC", r"\bflac\b"),
        ClassificationRule::new("OGG", r"\bogg\b"),
        ClassificationRule::new("Opus", r"\bopus\b"),
        ClassificationRule::new("EAC3", r"\b(eac3|eac-3|e-ac-3)\b"),
    ];

    // ============ SPOKEN LANGUAGE ============
    static ref LANGUAGE_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("English", r"\b(eng|english|en)\b"),
        ClassificationRule::new("Hindi", r"\b(hin|hindi|hi)\b"),
        ClassificationRule::new("Spanish", r"\b(spa|spanish|es)\b"),
        ClassificationRule::new("French", r"\b(fre|french|fr)\b"),
        ClassificationRule::new("German", r"\b(ger|german|de)\b"),
        ClassificationRule::new("Italian", r"\b(ita|italian|it)\b"),
        ClassificationRule::new("Japanese", r"\b(jpn|japanese|ja)\b"),
        ClassificationRule::new("Korean", r"\b(kor|korean|ko)\b"),
        ClassificationRule::new("Chinese", r"\b(chi|chinese|zh)\b"),
        ClassificationRule::new("Russian", r"\b(rus|russian|ru)\b"),
    ];

    // ============ SOURCE PLATFORM ============
    static ref SOURCE_RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::new("Netflix", r"\b(netflix|nf)\b"),
        ClassificationRule::new("Amazon Prime", r"\b(amzn|amazon)\b"),
        ClassificationRule::new("Disney+", r"\b(dsnp|disney)\b"),
        ClassificationRule::new("HBO Max", r"\b(hmax|hbo)\b"),
        ClassificationRule::new("Apple TV+", r"\b(atvp|apple)\b"),
        ClassificationRule::new("Hulu", r"\bhulu\b"),
        ClassificationRule::new("Peacock", r"\bpcok\b"),
        ClassificationRule::new("Paramount+", r"\bpmtp\b"),
        ClassificationRule::new("YouTube", r"\b(youtube|yt)\b"),
        ClassificationRule::new("BBC iPlayer", r"\bbbc\b"),
        ClassificationRule::new("iTunes", r"\bitunes\b"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_compiles() {
        for category in Category::ALL {
            assert!(!category.rules().is_empty(), "{} has no rules", category);
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(Category::Format.rules().len(), 16);
        assert_eq!(Category::Quality.rules().len(), 27);
        assert_eq!(Category::Resolution.rules().len(), 8);
        assert_eq!(Category::VideoCodec.rules().len(), 7);
        assert_eq!(Category::AudioCodec.rules().len(), 8);
        assert_eq!(Category::Language.rules().len(), 10);
        assert_eq!(Category::Source.rules().len(), 11);
    }

    #[test]
    fn test_format_is_suffix_only() {
        assert_eq!(Category::Format.first_match("movie.mkv"), Some("MKV"));
        assert_eq!(Category::Format.first_match("movie.mkv.part"), None);
        assert_eq!(Category::Format.first_match("mkv.movie"), None);
        assert_eq!(Category::Format.first_match("clip.mpeg"), Some("MPG"));
        assert_eq!(Category::Format.first_match("clip.MPG"), Some("MPG"));
        assert_eq!(Category::Format.first_match("stream.m2ts"), Some("M2TS"));
        assert_eq!(Category::Format.first_match("stream.ts"), Some("TS"));
    }

    #[test]
    fn test_quality_order_cam_before_camrip() {
        // Both rules hit "camrip"; the earlier one wins
        assert_eq!(Category::Quality.first_match("movie.camrip.avi"), Some("CAM"));
    }

    #[test]
    fn test_quality_order_bdrip_before_bluray() {
        assert_eq!(Category::Quality.first_match("movie.bdrip.mkv"), Some("BDRip"));
        assert_eq!(Category::Quality.first_match("movie.bluray.mkv"), Some("BluRay"));
        assert_eq!(Category::Quality.first_match("movie.bluray.bdrip.mkv"), Some("BDRip"));
    }

    #[test]
    fn test_quality_web_family_is_mutually_exclusive() {
        assert_eq!(Category::Quality.first_match("show.web-dl.mkv"), Some("WEB-DL"));
        assert_eq!(Category::Quality.first_match("show.webdl.mkv"), Some("WEB-DL"));
        assert_eq!(Category::Quality.first_match("show.web.dl.mkv"), Some("WEB-DL"));
        assert_eq!(Category::Quality.first_match("show.webrip.mkv"), Some("WEBRip"));
        assert_eq!(Category::Quality.first_match("show.web.rip.mkv"), Some("WEBRip"));
        assert_eq!(Category::Quality.first_match("show.web.mkv"), Some("WEB"));
        assert_eq!(Category::Quality.first_match("show.website.mkv"), None);
    }

    #[test]
    fn test_resolution_order_uhd_is_4k() {
        assert_eq!(Category::Resolution.first_match("movie.uhd.1080p"), Some("4K"));
        assert_eq!(Category::Resolution.first_match("movie.fullhd"), Some("1080p"));
        assert_eq!(Category::Resolution.first_match("movie.1080i.hd"), Some("1080p"));
        assert_eq!(Category::Resolution.first_match("movie.720i"), Some("720p"));
        assert_eq!(Category::Resolution.first_match("movie.sd"), Some("480p"));
    }

    #[test]
    fn test_video_codec_order() {
        assert_eq!(Category::VideoCodec.first_match("a.x265.x264"), Some("H.264"));
        assert_eq!(Category::VideoCodec.first_match("a.h.265"), Some("H.265"));
        assert_eq!(Category::VideoCodec.first_match("a.hevc"), Some("H.265"));
        assert_eq!(Category::VideoCodec.first_match("a.xvid"), Some("XviD"));
    }

    #[test]
    fn test_audio_codec_order() {
        assert_eq!(Category::AudioCodec.first_match("a.eac3.aac"), Some("AAC"));
        assert_eq!(Category::AudioCodec.first_match("a.dts-hd"), Some("DTS"));
        assert_eq!(Category::AudioCodec.first_match("a.eac3"), Some("EAC3"));
        // "ac-3" inside "e-ac-3" is a whole word, so AC3 shadows EAC3
        assert_eq!(Category::AudioCodec.first_match("a.e-ac-3"), Some("AC3"));
    }

    #[test]
    fn test_language_order() {
        assert_eq!(Category::Language.first_match("a.rus.eng"), Some("English"));
        assert_eq!(Category::Language.first_match("a.japanese"), Some("Japanese"));
        assert_eq!(Category::Language.first_match("english"), Some("English"));
    }

    #[test]
    fn test_source_order() {
        assert_eq!(Category::Source.first_match("a.hulu.nf"), Some("Netflix"));
        assert_eq!(Category::Source.first_match("a.amzn"), Some("Amazon Prime"));
        assert_eq!(Category::Source.first_match("a.dsnp"), Some("Disney+"));
        assert_eq!(Category::Source.first_match("a.pmtp"), Some("Paramount+"));
        assert_eq!(Category::Source.first_match("a.bbc"), Some("BBC iPlayer"));
    }

    #[test]
    fn test_matchers_are_case_insensitive() {
        assert_eq!(Category::Quality.first_match("Movie.BluRay"), Some("BluRay"));
        assert_eq!(Category::Format.first_match("Movie.MKV"), Some("MKV"));
    }

    #[test]
    fn test_labels_listing() {
        let labels: Vec<_> = Category::VideoCodec.labels().collect();
        assert_eq!(labels, vec!["H.264", "H.265", "VP9", "VP8", "XviD", "DivX", "AV1"]);
    }
}
