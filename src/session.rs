//! Editing session state
//!
//! One session per clip being captioned: the timeline, the subtitle sync
//! offset, and the waveform strip, owned explicitly instead of living in a
//! process-wide job map. The hosting layer creates a session when a clip is
//! opened and persists its record when it closes.

use crate::error::Result;
use crate::storage::SessionRecord;
use crate::timeline::{Segment, Timeline};
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

/// Mutable state for one caption-editing session
#[derive(Debug)]
pub struct EditSession {
    pub id: String,
    /// Display name of the source media, if known
    pub source_name: Option<String>,
    /// Source clip duration in seconds
    pub duration_seconds: f64,
    /// Global subtitle shift applied at display time, in seconds
    pub sync_offset: f64,
    pub created_at: String,
    pub updated_at: String,
    /// Normalized peak waveform for the timeline strip
    pub waveform: Vec<f32>,
    timeline: Timeline,
}

impl EditSession {
    pub fn new(source_name: Option<String>, duration_seconds: f64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            source_name,
            duration_seconds,
            sync_offset: 0.0,
            created_at: now.clone(),
            updated_at: now,
            waveform: Vec::new(),
            timeline: Timeline::new(),
        }
    }

    /// Adopt a caption list (e.g. a finished transcription) as the
    /// timeline's initial, undoable state
    pub fn load_segments(&mut self, segments: Vec<Segment>) -> Result<()> {
        let count = segments.len();
        self.timeline = Timeline::with_segments(segments)?;
        self.touch();
        info!("Session {} loaded {} captions", self.id, count);
        Ok(())
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Record the current caption list as an undo snapshot and touch the
    /// session's modification time
    pub fn checkpoint(&mut self) {
        self.timeline.push_history();
        self.touch();
    }

    pub fn set_sync_offset(&mut self, offset: f64) {
        self.sync_offset = offset;
        self.touch();
    }

    /// Persisted projection of this session
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            id: self.id.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            source_name: self.source_name.clone(),
            duration_seconds: self.duration_seconds,
            sync_offset: self.sync_offset,
            segments: self.timeline.segments().to_vec(),
            waveform: self.waveform.clone(),
        }
    }

    /// Rebuild a session from its persisted record
    pub fn from_record(record: SessionRecord) -> Result<Self> {
        let timeline = Timeline::with_segments(record.segments)?;
        Ok(Self {
            id: record.id,
            source_name: record.source_name,
            duration_seconds: record.duration_seconds,
            sync_offset: record.sync_offset,
            created_at: record.created_at,
            updated_at: record.updated_at,
            waveform: record.waveform,
            timeline,
        })
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Checkpoint coalescing policy
///
/// Rapid consecutive edits should collapse into one undo step, so the
/// hosting layer notes each edit here and checkpoints only once the
/// configured quiet period has passed. The clock is passed in, keeping the
/// policy deterministic and the Timeline itself free of timing concerns.
#[derive(Debug)]
pub struct CheckpointDebounce {
    delay: Duration,
    pending_since: Option<Instant>,
}

impl CheckpointDebounce {
    /// Quiet period used by the caption editor
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// An edit happened; restart the quiet period
    pub fn note_edit(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True (once) when the quiet period has elapsed since the last edit;
    /// the caller should checkpoint the timeline then
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.delay => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for CheckpointDebounce {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trips_through_record() {
        let mut session = EditSession::new(Some("clip.mp4".into()), 12.5);
        session
            .load_segments(vec![
                Segment::new(0.0, 2.0, "hello"),
                Segment::new(2.0, 4.0, "world"),
            ])
            .unwrap();
        session.set_sync_offset(-0.25);
        session.waveform = vec![0.1, 0.9, 0.3];

        let record = session.to_record();
        let restored = EditSession::from_record(record).unwrap();

        assert_eq!(restored.id, session.id);
        assert_eq!(restored.sync_offset, -0.25);
        assert_eq!(restored.duration_seconds, 12.5);
        assert_eq!(restored.waveform, vec![0.1, 0.9, 0.3]);
        assert_eq!(restored.timeline().segments(), session.timeline().segments());
    }

    #[test]
    fn test_checkpoint_enables_undo() {
        let mut session = EditSession::new(None, 10.0);
        session
            .load_segments(vec![Segment::new(0.0, 2.0, "hello")])
            .unwrap();

        session.timeline_mut().insert(2.0, 4.0, "world").unwrap();
        session.checkpoint();

        assert!(session.timeline().can_undo());
        session.timeline_mut().undo().unwrap();
        assert_eq!(session.timeline().len(), 1);
    }

    #[test]
    fn test_debounce_fires_after_quiet_period() {
        let mut debounce = CheckpointDebounce::new(Duration::from_millis(500));
        let t0 = Instant::now();

        debounce.note_edit(t0);
        assert!(!debounce.take_due(t0 + Duration::from_millis(100)));

        // A second edit restarts the quiet period
        debounce.note_edit(t0 + Duration::from_millis(200));
        assert!(!debounce.take_due(t0 + Duration::from_millis(600)));
        assert!(debounce.take_due(t0 + Duration::from_millis(700)));

        // Fires once per pending batch
        assert!(!debounce.take_due(t0 + Duration::from_millis(800)));
        assert!(!debounce.has_pending());
    }
}
