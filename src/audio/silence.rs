//! Silence detection over decoded audio
//!
//! Windowed peak-amplitude scan replacing the ffmpeg `silencedetect` filter:
//! a window is silent when its peak stays below a dB threshold relative to
//! full scale, and runs of silent windows shorter than the minimum duration
//! are treated as natural pauses rather than cuttable gaps.
//!
//! Also computes the two derived views consumers need after a removal pass:
//! the keep-list handed to the media cutter, and the retimed caption list.

use super::wav::AudioBuffer;
use crate::error::{AppError, Result};
use crate::timeline::Segment;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Full-scale amplitude for 16-bit PCM
pub const FULL_SCALE: f64 = 32768.0;

/// A half-open span of the media timeline, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Configuration for silence detection
#[derive(Debug, Clone)]
pub struct SilenceConfig {
    /// Threshold in dB relative to full scale; amplitude below it is silence.
    /// Must be <= 0.
    pub threshold_db: f64,
    /// Minimum contiguous silent duration to report, in seconds
    pub min_silence: f64,
    /// Analysis window length in seconds
    pub window: f64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            threshold_db: -30.0,
            min_silence: 0.5,
            window: 0.02, // 20ms analysis windows
        }
    }
}

impl SilenceConfig {
    /// Create a config with a custom threshold
    pub fn with_threshold(threshold_db: f64) -> Self {
        Self {
            threshold_db,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.threshold_db > 0.0 {
            return Err(AppError::InvalidParameter(format!(
                "threshold must be <= 0 dB relative to full scale, got {}",
                self.threshold_db
            )));
        }
        if self.min_silence < 0.0 {
            return Err(AppError::InvalidParameter(format!(
                "minimum silence duration must not be negative, got {}",
                self.min_silence
            )));
        }
        if self.window <= 0.0 {
            return Err(AppError::InvalidParameter(format!(
                "analysis window must be positive, got {}",
                self.window
            )));
        }
        Ok(())
    }

    /// Linear amplitude cutoff for the configured dB threshold
    pub fn amplitude_cutoff(&self) -> f64 {
        FULL_SCALE * 10f64.powf(self.threshold_db / 20.0)
    }
}

/// Find all silence intervals in a clip
///
/// # Arguments
/// * `audio` - Decoded mono audio
/// * `config` - Threshold, minimum duration and window length
///
/// # Returns
/// Intervals sorted ascending by start, non-overlapping. A clip entirely
/// above the threshold yields an empty list; a clip entirely below it yields
/// one interval covering the whole duration.
pub fn detect_silence(audio: &AudioBuffer, config: &SilenceConfig) -> Result<Vec<TimeRange>> {
    config.validate()?;

    if audio.is_empty() {
        return Err(AppError::AudioFormat("no samples to analyze".into()));
    }

    let cutoff = config.amplitude_cutoff();
    let rate = audio.sample_rate as f64;
    let window_samples = ((config.window * rate).round() as usize).max(1);
    let duration = audio.duration_seconds();

    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;

    let close_run = |from: usize, to: usize, intervals: &mut Vec<TimeRange>| {
        let start = from as f64 * window_samples as f64 / rate;
        let end = (to as f64 * window_samples as f64 / rate).min(duration);
        if end - start >= config.min_silence {
            intervals.push(TimeRange::new(start, end));
        } else {
            debug!(
                "Dropping short silence {:.2}s-{:.2}s ({:.0}ms < minimum)",
                start,
                end,
                (end - start) * 1000.0
            );
        }
    };

    for (w, window) in audio.samples.chunks(window_samples).enumerate() {
        let peak = window.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0);
        let silent = (peak as f64) < cutoff;

        match (silent, run_start) {
            (true, None) => run_start = Some(w),
            (false, Some(from)) => {
                close_run(from, w, &mut intervals);
                run_start = None;
            }
            _ => {}
        }
    }

    // Trailing silence runs to the end of the clip
    if let Some(from) = run_start {
        let total_windows = audio.samples.len().div_ceil(window_samples);
        close_run(from, total_windows, &mut intervals);
    }

    info!(
        "Detected {} silence intervals in {:.2}s clip (threshold {}dB, min {:.2}s)",
        intervals.len(),
        duration,
        config.threshold_db,
        config.min_silence
    );

    Ok(intervals)
}

/// Complement of the removed intervals over `[0, total_duration]`
///
/// This is the list of spans the media cutter keeps and concatenates.
/// Fails if removal would leave nothing.
pub fn keep_intervals(removed: &[TimeRange], total_duration: f64) -> Result<Vec<TimeRange>> {
    if total_duration <= 0.0 {
        return Err(AppError::InvalidParameter(format!(
            "total duration must be positive, got {}",
            total_duration
        )));
    }

    let mut keeps = Vec::new();
    let mut last_end = 0.0f64;

    for cut in coalesce(removed) {
        let cut_start = cut.start.clamp(0.0, total_duration);
        let cut_end = cut.end.clamp(0.0, total_duration);
        if cut_start > last_end {
            keeps.push(TimeRange::new(last_end, cut_start));
        }
        last_end = last_end.max(cut_end);
    }

    if last_end < total_duration {
        keeps.push(TimeRange::new(last_end, total_duration));
    }

    if keeps.is_empty() {
        return Err(AppError::InvalidParameter(
            "no audible ranges remain after removal".into(),
        ));
    }

    Ok(keeps)
}

/// Recompute caption timings after the given intervals are cut out
///
/// Every timestamp is shifted left by the removed time before it; a segment
/// partially covering a cut is trimmed to its surviving portion, and a
/// segment entirely inside a cut is dropped. Applying this with an empty
/// removal list returns the captions unchanged.
pub fn remove_silence(segments: &[Segment], removed: &[TimeRange]) -> Vec<Segment> {
    if removed.is_empty() {
        return segments.to_vec();
    }

    let cuts = coalesce(removed);

    segments
        .iter()
        .filter_map(|seg| {
            let start = remap(seg.start, &cuts);
            let end = remap(seg.end, &cuts);
            if end - start > f64::EPSILON {
                Some(Segment {
                    start,
                    end,
                    ..seg.clone()
                })
            } else {
                debug!("Dropping caption '{}' swallowed by removed interval", seg.text);
                None
            }
        })
        .collect()
}

/// Map a source timestamp onto the cut timeline
fn remap(t: f64, cuts: &[TimeRange]) -> f64 {
    let mut removed_before = 0.0;
    for cut in cuts {
        if cut.start >= t {
            break;
        }
        removed_before += cut.end.min(t) - cut.start;
    }
    t - removed_before
}

/// Sort and merge overlapping or touching ranges
fn coalesce(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges.iter().filter(|r| r.end > r.start).copied().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(prev) if range.start <= prev.end => prev.end = prev.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(sections: &[(f64, i16)], sample_rate: u32) -> AudioBuffer {
        let mut samples = Vec::new();
        for &(seconds, amplitude) in sections {
            let n = (seconds * sample_rate as f64) as usize;
            // Alternate sign so the signal is not a DC offset
            samples.extend((0..n).map(|i| if i % 2 == 0 { amplitude } else { -amplitude }));
        }
        AudioBuffer { samples, sample_rate }
    }

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            id: format!("seg_{}", text),
            start,
            end,
            text: text.to_string(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_silent_gap_detected() {
        // 10s clip, silent from 3s to 6s
        let audio = buffer(&[(3.0, 8000), (3.0, 100), (4.0, 8000)], 16000);
        let intervals =
            detect_silence(&audio, &SilenceConfig::default()).unwrap();

        assert_eq!(intervals.len(), 1);
        assert!((intervals[0].start - 3.0).abs() <= 0.02);
        assert!((intervals[0].end - 6.0).abs() <= 0.02);
    }

    #[test]
    fn test_all_loud_yields_empty() {
        let audio = buffer(&[(2.0, 8000)], 16000);
        let intervals = detect_silence(&audio, &SilenceConfig::default()).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_all_silent_yields_whole_clip() {
        let audio = buffer(&[(2.5, 50)], 16000);
        let intervals = detect_silence(&audio, &SilenceConfig::default()).unwrap();

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start, 0.0);
        assert!((intervals[0].end - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_pause_ignored() {
        // 0.2s pause is below the 0.5s minimum
        let audio = buffer(&[(1.0, 8000), (0.2, 100), (1.0, 8000)], 16000);
        let intervals = detect_silence(&audio, &SilenceConfig::default()).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_intervals_sorted_and_disjoint() {
        let audio = buffer(
            &[(1.0, 100), (0.5, 8000), (1.0, 100), (0.5, 8000), (1.0, 100)],
            8000,
        );
        let intervals = detect_silence(&audio, &SilenceConfig::default()).unwrap();

        assert_eq!(intervals.len(), 3);
        for pair in intervals.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_rejects_positive_threshold() {
        let audio = buffer(&[(1.0, 100)], 8000);
        let err = detect_silence(&audio, &SilenceConfig::with_threshold(3.0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_negative_min_duration() {
        let audio = buffer(&[(1.0, 100)], 8000);
        let config = SilenceConfig {
            min_silence: -1.0,
            ..Default::default()
        };
        let err = detect_silence(&audio, &config).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_buffer_is_an_error() {
        let audio = AudioBuffer {
            samples: vec![],
            sample_rate: 16000,
        };
        let err = detect_silence(&audio, &SilenceConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::AudioFormat(_)));
    }

    #[test]
    fn test_keep_intervals_complement() {
        let removed = vec![TimeRange::new(3.0, 6.0)];
        let keeps = keep_intervals(&removed, 10.0).unwrap();

        assert_eq!(keeps, vec![TimeRange::new(0.0, 3.0), TimeRange::new(6.0, 10.0)]);
    }

    #[test]
    fn test_keep_intervals_leading_silence() {
        let removed = vec![TimeRange::new(0.0, 2.0)];
        let keeps = keep_intervals(&removed, 5.0).unwrap();
        assert_eq!(keeps, vec![TimeRange::new(2.0, 5.0)]);
    }

    #[test]
    fn test_keep_intervals_nothing_left() {
        let removed = vec![TimeRange::new(0.0, 5.0)];
        let err = keep_intervals(&removed, 5.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[test]
    fn test_remove_silence_empty_list_is_identity() {
        let segments = vec![seg(0.0, 2.0, "hello"), seg(2.0, 4.0, "world")];
        let adjusted = remove_silence(&segments, &[]);
        assert_eq!(adjusted, segments);
    }

    #[test]
    fn test_remove_silence_shifts_later_segments() {
        let segments = vec![seg(0.0, 2.0, "before"), seg(5.0, 7.0, "after")];
        let removed = vec![TimeRange::new(2.0, 5.0)];
        let adjusted = remove_silence(&segments, &removed);

        assert_eq!(adjusted.len(), 2);
        assert_eq!(adjusted[0].start, 0.0);
        assert_eq!(adjusted[0].end, 2.0);
        assert!((adjusted[1].start - 2.0).abs() < 1e-9);
        assert!((adjusted[1].end - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_silence_drops_swallowed_segment() {
        let segments = vec![seg(0.0, 1.0, "keep"), seg(2.0, 3.0, "gone")];
        let removed = vec![TimeRange::new(1.5, 3.5)];
        let adjusted = remove_silence(&segments, &removed);

        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted[0].text, "keep");
    }

    #[test]
    fn test_remove_silence_trims_partial_overlap() {
        let segments = vec![seg(2.0, 4.0, "straddles")];
        let removed = vec![TimeRange::new(3.0, 5.0)];
        let adjusted = remove_silence(&segments, &removed);

        assert_eq!(adjusted.len(), 1);
        assert!((adjusted[0].start - 2.0).abs() < 1e-9);
        assert!((adjusted[0].end - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_silence_collapses_interior_cut() {
        // Cut sits wholly inside the segment; duration shrinks by the cut
        let segments = vec![seg(1.0, 5.0, "long")];
        let removed = vec![TimeRange::new(2.0, 3.0)];
        let adjusted = remove_silence(&segments, &removed);

        assert!((adjusted[0].start - 1.0).abs() < 1e-9);
        assert!((adjusted[0].end - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_silence_unsorted_input_ranges() {
        let segments = vec![seg(10.0, 12.0, "tail")];
        let removed = vec![TimeRange::new(6.0, 8.0), TimeRange::new(1.0, 2.0)];
        let adjusted = remove_silence(&segments, &removed);

        assert!((adjusted[0].start - 7.0).abs() < 1e-9);
        assert!((adjusted[0].end - 9.0).abs() < 1e-9);
    }
}
