//! Caption timeline editing and silence analysis for video captioning
//!
//! Two cooperating halves:
//!
//! - [`audio`] decodes PCM WAV clips and analyzes them: silence intervals,
//!   the keep-list a media cutter needs to excise them, the retimed caption
//!   list after a cut, and the peak waveform the editor draws.
//! - [`timeline`] maintains the authoritative ordered caption list under
//!   insert/delete/merge/split edits, with explicit checkpointing and a
//!   bounded undo/redo history.
//!
//! [`session`] ties one clip's state together, and [`storage`] persists it.
//! Heavier collaborators stay outside the crate: transcription produces the
//! initial caption list, and ffmpeg performs the actual media cut from the
//! keep-list computed here.

pub mod audio;
pub mod error;
pub mod export;
pub mod session;
pub mod storage;
pub mod timeline;

pub use audio::{detect_silence, AudioBuffer, SilenceConfig, TimeRange};
pub use error::{AppError, Result};
pub use session::{CheckpointDebounce, EditSession};
pub use timeline::{Segment, Timeline};
