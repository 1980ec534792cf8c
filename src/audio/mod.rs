pub mod silence;
pub mod wav;
pub mod waveform;

pub use silence::{detect_silence, keep_intervals, remove_silence, SilenceConfig, TimeRange};
pub use wav::{decode_wav_bytes, read_wav, AudioBuffer};
pub use waveform::{generate_waveform, DEFAULT_SAMPLES_PER_SECOND};
