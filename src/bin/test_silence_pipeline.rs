//! Exercise the full silence pipeline on a synthetic clip
//!
//! Run with: cargo run --bin test_silence_pipeline
//!
//! Builds a 10s clip that is loud for 3s, silent for 3s, loud for 4s,
//! round-trips it through a WAV file, then runs detection, waveform
//! extraction, keep-list computation and caption retiming.

use capscribe::audio::{
    detect_silence, generate_waveform, keep_intervals, read_wav, remove_silence, SilenceConfig,
    DEFAULT_SAMPLES_PER_SECOND,
};
use capscribe::export::{render, SubtitleFormat};
use capscribe::timeline::{Segment, Timeline};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SAMPLE_RATE: u32 = 16000;

/// Deterministic noise, loud or quiet
fn synth_section(seconds: f64, amplitude: i16, seed: &mut u64) -> Vec<i16> {
    let n = (seconds * SAMPLE_RATE as f64) as usize;
    (0..n)
        .map(|_| {
            *seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let random = ((*seed >> 16) & 0x7FFF) as f64 / 32767.0 * 2.0 - 1.0;
            (random * amplitude as f64) as i16
        })
        .collect()
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let mut seed = 42u64;
    let mut samples = synth_section(3.0, 8000, &mut seed);
    samples.extend(synth_section(3.0, 40, &mut seed));
    samples.extend(synth_section(4.0, 8000, &mut seed));

    let wav_path = std::env::temp_dir().join("capscribe_pipeline_demo.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&wav_path, spec).expect("create demo wav");
    for &s in &samples {
        writer.write_sample(s).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    println!("Wrote {:.1}s demo clip to {:?}", 10.0, wav_path);

    let audio = read_wav(&wav_path).expect("decode demo wav");
    println!(
        "Decoded: {} samples at {}Hz ({:.2}s)",
        audio.len(),
        audio.sample_rate,
        audio.duration_seconds()
    );

    let waveform = generate_waveform(&audio, DEFAULT_SAMPLES_PER_SECOND).expect("waveform");
    let peak = waveform.iter().cloned().fold(0.0f32, f32::max);
    println!("Waveform: {} buckets, peak {:.3}", waveform.len(), peak);

    let intervals = detect_silence(&audio, &SilenceConfig::default()).expect("detect");
    println!("Silence intervals:");
    for interval in &intervals {
        println!(
            "  {:.2}s - {:.2}s ({:.2}s)",
            interval.start,
            interval.end,
            interval.duration()
        );
    }

    let keeps = keep_intervals(&intervals, audio.duration_seconds()).expect("keep list");
    println!("Keep list for the media cutter:");
    for keep in &keeps {
        println!("  {:.2}s - {:.2}s", keep.start, keep.end);
    }

    // Captions as a transcription step would produce them
    let mut timeline = Timeline::with_segments(vec![
        Segment::new(0.5, 2.5, "first spoken line"),
        Segment::new(6.5, 9.5, "second spoken line"),
    ])
    .expect("timeline");

    timeline.split(8.0, 0.0).expect("split");
    timeline.push_history();
    println!("After split: {} captions", timeline.len());

    let retimed = remove_silence(timeline.segments(), &intervals);
    println!("Captions after silence removal:");
    for seg in &retimed {
        println!("  {:.2}s - {:.2}s '{}'", seg.start, seg.end, seg.text);
    }

    println!("--- SRT ---");
    println!("{}", render(&retimed, SubtitleFormat::Srt));
}
