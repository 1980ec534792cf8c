use crate::error::Result;
use crate::timeline::Segment;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render a caption list as plain text, one caption per line
pub fn to_txt(segments: &[Segment], include_timestamps: bool) -> String {
    segments
        .iter()
        .map(|seg| {
            if include_timestamps {
                format!(
                    "[{} - {}] {}",
                    format_simple(seg.start),
                    format_simple(seg.end),
                    seg.text
                )
            } else {
                seg.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_to_txt(segments: &[Segment], path: &Path, include_timestamps: bool) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_txt(segments, include_timestamps).as_bytes())?;
    Ok(())
}

/// `MM:SS` (minutes are not capped at 59)
fn format_simple(seconds: f64) -> String {
    let total = seconds.max(0.0) as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_timestamps() {
        let segments = vec![Segment::new(65.0, 70.0, "hello")];
        assert_eq!(to_txt(&segments, true), "[01:05 - 01:10] hello");
    }

    #[test]
    fn test_without_timestamps() {
        let segments = vec![
            Segment::new(0.0, 2.0, "hello"),
            Segment::new(2.0, 4.0, "world"),
        ];
        assert_eq!(to_txt(&segments, false), "hello\nworld");
    }
}
