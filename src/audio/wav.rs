//! WAV decoding for analysis input
//!
//! Decodes RIFF/WAVE files into a mono 16-bit buffer. Only integer PCM at
//! 16 bits per sample is accepted; anything else is rejected rather than
//! guessed at.

use crate::error::{AppError, Result};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// Decoded mono PCM audio
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Signed 16-bit samples, mono
    pub samples: Vec<i16>,
    /// Samples per second
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Load a WAV file from disk
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| AppError::AudioFormat(e.to_string()))?;
    decode(reader)
}

/// Decode a WAV file already held in memory
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<AudioBuffer> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| AppError::AudioFormat(e.to_string()))?;
    decode(reader)
}

fn decode<R: std::io::Read>(reader: hound::WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(AppError::AudioFormat(format!(
            "unsupported sample format: {:?} {} bits, only 16-bit integer PCM is supported",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(AppError::AudioFormat("fmt chunk declares zero channels".into()));
    }

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AppError::AudioFormat(e.to_string()))?;

    if samples.is_empty() {
        return Err(AppError::AudioFormat("data chunk contains no samples".into()));
    }

    // Convert to mono by averaging channels
    let mono_samples: Vec<i16> = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    } else {
        samples
    };

    info!(
        "Decoded WAV: {}Hz, {} channels, {} mono samples",
        spec.sample_rate,
        channels,
        mono_samples.len()
    );

    Ok(AudioBuffer {
        samples: mono_samples,
        sample_rate: spec.sample_rate,
    })
}
