use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{AnalysisResult, FormatDetails};
use crate::services::catalog::Category;

lazy_static! {
    // ============ AUXILIARY FLAGS ============
    static ref SUBTITLES: Regex = Regex::new(r"\b(sub|subs|subtitle|subtitles)\b").unwrap();
    static ref MULTI_AUDIO: Regex = Regex::new(r"\b(dual|multi|multilang)\b").unwrap();
    static ref THREE_D: Regex = Regex::new(r"\b3d\b").unwrap();
    static ref HDR: Regex = Regex::new(r"\b(hdr|hdr10|dolby\.vision)\b").unwrap();

    // ============ EXTRACTORS ============
    static ref YEAR: Regex = Regex::new(r"\b(19|20)\d{2}\b").unwrap();

    // Tried in order, first family that matches wins
    static ref SEASON_EPISODE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"s(\d+)e(\d+)").unwrap(),
        Regex::new(r"season.?(\d+).?episode.?(\d+)").unwrap(),
        Regex::new(r"(\d+)x(\d+)").unwrap(),
    ];
}

/// Lexical filename analyzer
///
/// Every call is independent and reads only the static pattern catalog,
/// so it can be used from any number of tasks at once.
pub struct FileAnalyzer;

impl FileAnalyzer {
    /// Classify a filename. Never fails: missing evidence leaves fields empty.
    pub fn analyze(filename: &str) -> AnalysisResult {
        let lower = filename.to_lowercase();
        let mut result = AnalysisResult::unknown(filename);

        if let Some(label) = Category::Format.first_match(&lower) {
            result.file_type = label.to_string();
        }

        let pick = |category: Category| category.first_match(&lower).map(str::to_string);
        result.quality = pick(Category::Quality);
        result.resolution = pick(Category::Resolution);
        result.video_codec = pick(Category::VideoCodec);
        result.audio_codec = pick(Category::AudioCodec);
        result.language = pick(Category::Language);
        result.source = pick(Category::Source);

        result.details = FormatDetails {
            has_subtitles: SUBTITLES.is_match(&lower),
            has_multiple_audio: MULTI_AUDIO.is_match(&lower),
            is_3d: THREE_D.is_match(&lower),
            is_hdr: HDR.is_match(&lower),
            year: Self::extract_year(filename),
            season_episode: Self::extract_season_episode(&lower),
        };

        result
    }

    /// First standalone 19xx/20xx run, by position
    pub fn extract_year(filename: &str) -> Option<String> {
        YEAR.find(filename).map(|m| m.as_str().to_string())
    }

    /// Normalized `SxxEyy` from the first pattern family that matches.
    /// Expects the already lowercased filename.
    fn extract_season_episode(lower: &str) -> Option<String> {
        SEASON_EPISODE_PATTERNS.iter().find_map(|pattern| {
            let caps = pattern.captures(lower)?;
            let season = caps.get(1)?.as_str();
            let episode = caps.get(2)?.as_str();
            Some(format!("S{:0>2}E{:0>2}", season, episode))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_declared(category: Category, value: &Option<String>) -> bool {
        match value {
            None => true,
            Some(label) => category.labels().any(|l| l == label.as_str()),
        }
    }

    #[test]
    fn test_analyze_bluray_movie() {
        let result = FileAnalyzer::analyze("Movie.2023.1080p.BluRay.x264.mkv");
        assert_eq!(result.filename, "Movie.2023.1080p.BluRay.x264.mkv");
        assert_eq!(result.file_type, "MKV");
        assert_eq!(result.quality.as_deref(), Some("BluRay"));
        assert_eq!(result.resolution.as_deref(), Some("1080p"));
        assert_eq!(result.video_codec.as_deref(), Some("H.264"));
        assert_eq!(result.details.year.as_deref(), Some("2023"));
        assert!(result.details.season_episode.is_none());
    }

    #[test]
    fn test_analyze_web_episode() {
        let result = FileAnalyzer::analyze("Show.S02E05.720p.WEB-DL.AAC.mp4");
        assert_eq!(result.file_type, "MP4");
        assert_eq!(result.quality.as_deref(), Some("WEB-DL"));
        assert_eq!(result.resolution.as_deref(), Some("720p"));
        assert_eq!(result.audio_codec.as_deref(), Some("AAC"));
        assert_eq!(result.details.season_episode.as_deref(), Some("S02E05"));
    }

    #[test]
    fn test_analyze_no_evidence() {
        let result = FileAnalyzer::analyze("random_text_no_extension");
        assert_eq!(result, AnalysisResult::unknown("random_text_no_extension"));
    }

    #[test]
    fn test_analyze_empty_string() {
        let result = FileAnalyzer::analyze("");
        assert_eq!(result, AnalysisResult::unknown(""));
    }

    #[test]
    fn test_analyze_first_year_wins() {
        let result = FileAnalyzer::analyze("Movie.2019.2020.CAM.avi");
        assert_eq!(result.details.year.as_deref(), Some("2019"));
        assert_eq!(result.quality.as_deref(), Some("CAM"));
        assert_eq!(result.file_type, "AVI");
    }

    #[test]
    fn test_year_by_position_not_magnitude() {
        assert_eq!(FileAnalyzer::extract_year("Film 2010 remake of 1984"), Some("2010".to_string()));
        assert_eq!(FileAnalyzer::extract_year("Film 1984 remade 2010"), Some("1984".to_string()));
        assert_eq!(FileAnalyzer::extract_year("Film 2150"), None);
        assert_eq!(FileAnalyzer::extract_year("Film 20231"), None);
    }

    #[test]
    fn test_season_episode_families() {
        let episode = |name: &str| FileAnalyzer::analyze(name).details.season_episode;

        assert_eq!(episode("show.s1e2.mkv").as_deref(), Some("S01E02"));
        assert_eq!(episode("Show Season 3 Episode 7").as_deref(), Some("S03E07"));
        assert_eq!(episode("Show.Season.10.Episode.12").as_deref(), Some("S10E12"));
        assert_eq!(episode("Show 1x01").as_deref(), Some("S01E01"));
        assert_eq!(episode("Show.S01E105").as_deref(), Some("S01E105"));
        assert_eq!(episode("Plain Movie"), None);
    }

    #[test]
    fn test_season_episode_takes_lowercased_input() {
        assert_eq!(
            FileAnalyzer::extract_season_episode("show.s01e02.mkv"),
            Some("S01E02".to_string())
        );
        assert_eq!(FileAnalyzer::extract_season_episode("SHOW.S01E02.MKV"), None);
    }

    #[test]
    fn test_season_episode_priority() {
        // The SxxEyy family beats NxNN even when NxNN appears first
        let result = FileAnalyzer::analyze("Show.2x03.S04E05.mkv");
        assert_eq!(result.details.season_episode.as_deref(), Some("S04E05"));
    }

    #[test]
    fn test_auxiliary_flags() {
        let result = FileAnalyzer::analyze("Movie.2020.3D.HDR10.Dual.Subs.mkv");
        assert!(result.details.is_3d);
        assert!(result.details.is_hdr);
        assert!(result.details.has_multiple_audio);
        assert!(result.details.has_subtitles);

        let result = FileAnalyzer::analyze("Movie.Dolby.Vision.mkv");
        assert!(result.details.is_hdr);

        // Literal dot between dolby and vision
        let result = FileAnalyzer::analyze("Movie.DolbyXVision.mkv");
        assert!(!result.details.is_hdr);

        let result = FileAnalyzer::analyze("Movie.Subway.Multiplex.mkv");
        assert!(!result.details.has_subtitles);
        assert!(!result.details.has_multiple_audio);
    }

    #[test]
    fn test_categories_are_independent() {
        // UHD is a quality and a resolution at the same time
        let result = FileAnalyzer::analyze("Movie.UHD.HEVC.Atmos.mkv");
        assert_eq!(result.quality.as_deref(), Some("UHD"));
        assert_eq!(result.resolution.as_deref(), Some("4K"));
        assert_eq!(result.video_codec.as_deref(), Some("H.265"));
    }

    #[test]
    fn test_source_and_language() {
        let result = FileAnalyzer::analyze("Show.S01E01.NF.WEBRip.Hindi.mkv");
        assert_eq!(result.source.as_deref(), Some("Netflix"));
        assert_eq!(result.language.as_deref(), Some("Hindi"));
        assert_eq!(result.quality.as_deref(), Some("WEBRip"));
    }

    #[test]
    fn test_fields_only_hold_declared_labels() {
        let names = [
            "Movie.2023.1080p.BluRay.x264.mkv",
            "Show.S02E05.720p.WEB-DL.AAC.mp4",
            "[Group] Anime - 12 (1080p) [HEVC][FLAC].mkv",
            "Концерт.2012.DVDRip.avi",
            "a.b.c.d",
            "   ",
            "x.TS",
        ];
        for name in names {
            let result = FileAnalyzer::analyze(name);
            assert!(result.file_type == "Unknown" || Category::Format.labels().any(|l| l == result.file_type));
            assert!(is_declared(Category::Quality, &result.quality));
            assert!(is_declared(Category::Resolution, &result.resolution));
            assert!(is_declared(Category::VideoCodec, &result.video_codec));
            assert!(is_declared(Category::AudioCodec, &result.audio_codec));
            assert!(is_declared(Category::Language, &result.language));
            assert!(is_declared(Category::Source, &result.source));
        }
    }

    #[test]
    fn test_format_ignores_inner_extension() {
        let result = FileAnalyzer::analyze("Movie.mkv.720p.WEB");
        assert_eq!(result.file_type, "Unknown");
        assert_eq!(result.quality.as_deref(), Some("WEB"));
    }
}
