use crate::error::Result;
use crate::timeline::Segment;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Styling for the generated ASS `Default` style
#[derive(Debug, Clone)]
pub struct AssStyle {
    pub font_family: String,
    pub font_size: u32,
    /// Text color as `#RRGGBB`
    pub color: String,
    /// Box color as `#RRGGBB`, rendered half-transparent
    pub bg_color: String,
    pub bold: bool,
    pub italic: bool,
}

impl Default for AssStyle {
    fn default() -> Self {
        Self {
            font_family: "Pretendard".to_string(),
            font_size: 24,
            color: "#FFFFFF".to_string(),
            bg_color: "#000000".to_string(),
            bold: false,
            italic: false,
        }
    }
}

/// Render a caption list as Advanced SubStation Alpha
pub fn to_ass(segments: &[Segment], style: &AssStyle) -> String {
    let primary = ass_color(&style.color, 0);
    let back = ass_color(&style.bg_color, 128);
    // ASS encodes booleans as -1/0
    let bold = if style.bold { -1 } else { 0 };
    let italic = if style.italic { -1 } else { 0 };

    let mut ass = format!(
        "[Script Info]\n\
         Title: Capscribe Export\n\
         ScriptType: v4.00+\n\
         PlayResX: 1920\n\
         PlayResY: 1080\n\
         Timer: 100.0000\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: Default,{},{},{},&H000000FF,&H00000000,{},{},{},0,0,100,100,0,0,1,2,1,2,10,10,40,1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        style.font_family, style.font_size, primary, back, bold, italic
    );

    for seg in segments {
        ass.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
            format_ass_timestamp(seg.start),
            format_ass_timestamp(seg.end),
            seg.text
        ));
    }

    ass
}

pub fn export_to_ass(segments: &[Segment], style: &AssStyle, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_ass(segments, style).as_bytes())?;
    Ok(())
}

/// `H:MM:SS.cc` (centiseconds)
fn format_ass_timestamp(seconds: f64) -> String {
    let ms = (seconds * 1000.0).round().max(0.0) as i64;
    format!(
        "{}:{:02}:{:02}.{:02}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1000,
        (ms % 1000) / 10
    )
}

/// `#RRGGBB` -> ASS `&HAABBGGRR`
fn ass_color(hex: &str, alpha: u8) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    let r = channel(1..3);
    let g = channel(3..5);
    let b = channel(5..7);
    format!("&H{:02X}{:02X}{:02X}{:02X}", alpha, b, g, r)
}
