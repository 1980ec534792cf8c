use crate::error::Result;
use crate::timeline::Segment;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render a caption list as SRT
pub fn to_srt(segments: &[Segment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                format_srt_timestamp(seg.start),
                format_srt_timestamp(seg.end),
                seg.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_to_srt(segments: &[Segment], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_srt(segments).as_bytes())?;
    Ok(())
}

/// `HH:MM:SS,mmm`
pub(crate) fn format_srt_timestamp(seconds: f64) -> String {
    let ms = (seconds * 1000.0).round().max(0.0) as i64;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1000,
        ms % 1000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(1.5), "00:00:01,500");
        assert_eq!(format_srt_timestamp(3661.042), "01:01:01,042");
        // Negative inputs clamp to zero rather than rendering nonsense
        assert_eq!(format_srt_timestamp(-2.0), "00:00:00,000");
    }

    #[test]
    fn test_renders_numbered_blocks() {
        let segments = vec![
            Segment::new(0.0, 2.0, "hello"),
            Segment::new(2.0, 4.5, "world"),
        ];
        let srt = to_srt(&segments);

        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:02,000\nhello\n\n2\n00:00:02,000 --> 00:00:04,500\nworld\n"
        );
    }

    #[test]
    fn test_empty_list_renders_empty() {
        assert_eq!(to_srt(&[]), "");
    }
}
