//! Peak-amplitude waveform extraction
//!
//! Reduces a clip to a fixed number of normalized peaks per second for the
//! editor's timeline strip.

use super::wav::AudioBuffer;
use crate::error::{AppError, Result};
use crate::audio::silence::FULL_SCALE;

/// Default output resolution
pub const DEFAULT_SAMPLES_PER_SECOND: u32 = 100;

/// Extract a normalized peak waveform
///
/// # Arguments
/// * `audio` - Decoded mono audio
/// * `samples_per_second` - Output resolution (peaks per second of audio)
///
/// # Returns
/// One value in `0.0..=1.0` per bucket: the peak absolute amplitude over
/// that bucket, relative to full scale.
pub fn generate_waveform(audio: &AudioBuffer, samples_per_second: u32) -> Result<Vec<f32>> {
    if samples_per_second == 0 {
        return Err(AppError::InvalidParameter(
            "waveform resolution must be at least 1 sample per second".into(),
        ));
    }

    let step = ((audio.sample_rate / samples_per_second) as usize).max(1);

    let waveform = audio
        .samples
        .chunks(step)
        .map(|bucket| {
            let peak = bucket.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0);
            (peak as f64 / FULL_SCALE) as f32
        })
        .collect();

    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_count() {
        // 2 seconds at 16kHz, 100 peaks/second -> 200 buckets
        let audio = AudioBuffer {
            samples: vec![0i16; 32000],
            sample_rate: 16000,
        };
        let waveform = generate_waveform(&audio, DEFAULT_SAMPLES_PER_SECOND).unwrap();
        assert_eq!(waveform.len(), 200);
    }

    #[test]
    fn test_peaks_normalized() {
        let mut samples = vec![0i16; 160];
        samples[40] = i16::MIN; // |-32768| is full scale
        let audio = AudioBuffer {
            samples,
            sample_rate: 16000,
        };

        let waveform = generate_waveform(&audio, 100).unwrap();
        assert_eq!(waveform.len(), 1);
        assert!((waveform[0] - 1.0).abs() < 1e-6);
        assert!(waveform.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_peak_lands_in_right_bucket() {
        let mut samples = vec![0i16; 480];
        samples[200] = 16384; // second of three buckets
        let audio = AudioBuffer {
            samples,
            sample_rate: 16000,
        };

        let waveform = generate_waveform(&audio, 100).unwrap();
        assert_eq!(waveform.len(), 3);
        assert_eq!(waveform[0], 0.0);
        assert!((waveform[1] - 0.5).abs() < 1e-3);
        assert_eq!(waveform[2], 0.0);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let audio = AudioBuffer {
            samples: vec![0i16; 16],
            sample_rate: 16000,
        };
        let err = generate_waveform(&audio, 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }
}
