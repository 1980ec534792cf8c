pub mod ass;
pub mod srt;
pub mod txt;
pub mod vtt;

pub use ass::{export_to_ass, to_ass, AssStyle};
pub use srt::{export_to_srt, to_srt};
pub use txt::{export_to_txt, to_txt};
pub use vtt::{export_to_vtt, to_vtt};

use crate::timeline::Segment;

/// Subtitle output formats supported by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Ass,
    Txt,
}

impl SubtitleFormat {
    /// Parse a format name; unknown names fall back to SRT, the default
    /// download format of the editor
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "vtt" => Self::Vtt,
            "ass" => Self::Ass,
            "txt" => Self::Txt,
            _ => Self::Srt,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => ".srt",
            Self::Vtt => ".vtt",
            Self::Ass => ".ass",
            Self::Txt => ".txt",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Vtt => "text/vtt",
            _ => "text/plain",
        }
    }
}

/// Render a caption list in the given format with default styling
pub fn render(segments: &[Segment], format: SubtitleFormat) -> String {
    match format {
        SubtitleFormat::Srt => to_srt(segments),
        SubtitleFormat::Vtt => to_vtt(segments),
        SubtitleFormat::Ass => to_ass(segments, &AssStyle::default()),
        SubtitleFormat::Txt => to_txt(segments, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_to_srt() {
        assert_eq!(SubtitleFormat::parse("vtt"), SubtitleFormat::Vtt);
        assert_eq!(SubtitleFormat::parse("ASS"), SubtitleFormat::Ass);
        assert_eq!(SubtitleFormat::parse("something-else"), SubtitleFormat::Srt);
    }

    #[test]
    fn test_extension_and_mime() {
        assert_eq!(SubtitleFormat::Vtt.extension(), ".vtt");
        assert_eq!(SubtitleFormat::Vtt.mime(), "text/vtt");
        assert_eq!(SubtitleFormat::Srt.mime(), "text/plain");
    }
}
