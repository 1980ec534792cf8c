use crate::error::Result;
use crate::export::srt::format_srt_timestamp;
use crate::timeline::Segment;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render a caption list as WebVTT
pub fn to_vtt(segments: &[Segment]) -> String {
    let body = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                format_vtt_timestamp(seg.start),
                format_vtt_timestamp(seg.end),
                seg.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("WEBVTT\n\n{}", body)
}

pub fn export_to_vtt(segments: &[Segment], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_vtt(segments).as_bytes())?;
    Ok(())
}

/// `HH:MM:SS.mmm` — the SRT shape with a dot separator
fn format_vtt_timestamp(seconds: f64) -> String {
    format_srt_timestamp(seconds).replace(',', ".")
}
