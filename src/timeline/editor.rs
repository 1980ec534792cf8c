//! Caption timeline editing
//!
//! One authoritative ordered caption list plus a bounded snapshot history
//! with a cursor. Edits apply fully or not at all; checkpointing is an
//! explicit call so the hosting layer decides which edits coalesce into one
//! undo step (a drag in progress should not be ten of them).

use super::segment::{new_segment_id, Segment};
use crate::error::{AppError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Snapshots kept before the oldest history entry is evicted
pub const MAX_HISTORY: usize = 50;

/// Split points closer than this to a caption boundary are rejected, in
/// seconds; prevents degenerate near-zero-length captions
const SPLIT_GUARD_SECONDS: f64 = 0.1;

/// An ordered caption list with undo/redo history
///
/// Not safe for concurrent mutation; one editing session owns one timeline.
#[derive(Debug, Clone)]
pub struct Timeline {
    segments: Vec<Segment>,
    history: Vec<Vec<Segment>>,
    cursor: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            history: vec![Vec::new()],
            cursor: 0,
        }
    }

    /// Create a timeline from an initial caption list (e.g. a transcription
    /// result), seeding history with it as the first undo snapshot
    pub fn with_segments(segments: Vec<Segment>) -> Result<Self> {
        let mut timeline = Self::new();
        timeline.replace_all(segments)?;
        timeline.history = vec![timeline.segments.clone()];
        timeline.cursor = 0;
        Ok(timeline)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Validate, sort and replace the whole caption list
    ///
    /// Does not push history; callers checkpoint when the replacement is a
    /// meaningful undo step.
    pub fn replace_all(&mut self, mut segments: Vec<Segment>) -> Result<()> {
        let mut seen = HashSet::new();
        for segment in &segments {
            segment.validate()?;
            if !seen.insert(segment.id.as_str()) {
                return Err(AppError::InvalidParameter(format!(
                    "duplicate segment id '{}'",
                    segment.id
                )));
            }
        }

        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        self.segments = segments;
        Ok(())
    }

    /// Insert a new caption at its sorted position, returning its id
    pub fn insert(&mut self, start: f64, end: f64, text: impl Into<String>) -> Result<String> {
        if start >= end {
            return Err(AppError::InvalidRange(format!(
                "caption start {} must be before end {}",
                start, end
            )));
        }

        let segment = Segment::new(start, end, text);
        let id = segment.id.clone();
        let position = self.segments.partition_point(|s| s.start <= start);
        self.segments.insert(position, segment);

        debug!("Inserted caption {} at {:.2}s-{:.2}s", id, start, end);
        Ok(id)
    }

    /// Remove and return the caption at `index`
    pub fn delete(&mut self, index: usize) -> Result<Segment> {
        self.check_index(index)?;
        let removed = self.segments.remove(index);
        debug!("Deleted caption {} ('{}')", removed.id, removed.text);
        Ok(removed)
    }

    /// Replace the text of the caption with the given id
    ///
    /// An unknown id is a no-op: live callers routinely race text edits
    /// against deletions, and the original editor treated a miss as harmless.
    pub fn update_text(&mut self, id: &str, text: impl Into<String>) {
        match self.segments.iter_mut().find(|s| s.id == id) {
            Some(segment) => segment.text = text.into(),
            None => warn!("update_text: no caption with id '{}'", id),
        }
    }

    /// Replace the text of the caption at `index` (positional addressing,
    /// kept for callers that track captions by list position)
    pub fn update_text_at(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.segments[index].text = text.into();
        Ok(())
    }

    /// Rewrite the timing of the caption at `index`, rounded to centiseconds
    ///
    /// Neither re-sorts nor validates against neighbors: drag-to-resize
    /// feeds transient states through here, and the caller settles ordering
    /// when the gesture ends.
    pub fn update_timing(&mut self, index: usize, new_start: f64, new_end: f64) -> Result<()> {
        self.check_index(index)?;
        let segment = &mut self.segments[index];
        segment.start = round_centis(new_start);
        segment.end = round_centis(new_end);
        Ok(())
    }

    /// Merge the captions at two positions (order-independent)
    ///
    /// The earlier caption keeps its id and start, takes the later one's
    /// end, and the texts join with a single space.
    pub fn merge(&mut self, index_a: usize, index_b: usize) -> Result<()> {
        let (a, b) = (index_a.min(index_b), index_a.max(index_b));
        if a == b {
            return Err(AppError::InvalidRange(
                "merge needs two distinct captions".into(),
            ));
        }
        self.check_index(b)?;

        let later = self.segments.remove(b);
        let earlier = &mut self.segments[a];
        earlier.end = later.end;
        earlier.text = format!("{} {}", earlier.text, later.text);

        debug!("Merged captions {} and {} into {}", a, b, earlier.id);
        Ok(())
    }

    /// Split the caption under the playhead into two
    ///
    /// `current_time` is a playback position; `sync_offset` is the global
    /// subtitle shift, so the hit test runs against `[start + offset,
    /// end + offset]`. The text splits at the first space at or after its
    /// character midpoint (or exactly at the midpoint if there is none).
    pub fn split(&mut self, current_time: f64, sync_offset: f64) -> Result<()> {
        let index = self
            .segments
            .iter()
            .position(|s| {
                current_time >= s.start + sync_offset && current_time <= s.end + sync_offset
            })
            .ok_or_else(|| {
                AppError::NotFound("no caption under the current playback position".into())
            })?;

        let split_time = current_time - sync_offset;
        let original = &self.segments[index];
        if split_time <= original.start + SPLIT_GUARD_SECONDS
            || split_time >= original.end - SPLIT_GUARD_SECONDS
        {
            return Err(AppError::InvalidSplitPoint(format!(
                "{:.2}s is within {:.1}s of a caption boundary",
                split_time, SPLIT_GUARD_SECONDS
            )));
        }

        let (first_text, second_text) = split_text(&original.text);
        let first = Segment {
            id: new_segment_id(),
            start: original.start,
            end: split_time,
            text: first_text,
            confidence: original.confidence,
        };
        let second = Segment {
            id: new_segment_id(),
            start: split_time,
            end: original.end,
            text: second_text,
            confidence: original.confidence,
        };

        debug!(
            "Split caption {} at {:.2}s into '{}' / '{}'",
            original.id, split_time, first.text, second.text
        );
        self.segments.splice(index..=index, [first, second]);
        Ok(())
    }

    /// Record the current caption list as a new undo snapshot
    ///
    /// Discards any redoable entries past the cursor, then appends; the
    /// oldest snapshot is evicted once the bound is reached. When to call
    /// this is the hosting layer's policy (see `CheckpointDebounce`).
    pub fn push_history(&mut self) {
        self.history.truncate(self.cursor + 1);
        self.history.push(self.segments.clone());

        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
        self.cursor = self.history.len() - 1;
    }

    /// Restore the previous snapshot
    pub fn undo(&mut self) -> Result<()> {
        if !self.can_undo() {
            return Err(AppError::NothingToUndo);
        }
        self.cursor -= 1;
        self.segments = self.history[self.cursor].clone();
        debug!("Undo to history entry {}", self.cursor);
        Ok(())
    }

    /// Restore the next snapshot
    pub fn redo(&mut self) -> Result<()> {
        if !self.can_redo() {
            return Err(AppError::NothingToRedo);
        }
        self.cursor += 1;
        self.segments = self.history[self.cursor].clone();
        debug!("Redo to history entry {}", self.cursor);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.segments.len() {
            return Err(AppError::InvalidRange(format!(
                "caption index {} out of bounds (have {})",
                index,
                self.segments.len()
            )));
        }
        Ok(())
    }
}

fn round_centis(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cut text at the first space at or after the character midpoint; falls
/// back to the midpoint character when the text has no later space
fn split_text(text: &str) -> (String, String) {
    let chars: Vec<char> = text.chars().collect();
    let mid = chars.len() / 2;
    let split_index = chars[mid..]
        .iter()
        .position(|&c| c == ' ')
        .map(|offset| mid + offset)
        .unwrap_or(mid);

    let first: String = chars[..split_index].iter().collect();
    let second: String = chars[split_index..].iter().collect();
    (first.trim().to_string(), second.trim().to_string())
}
