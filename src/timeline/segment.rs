use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single caption on the media timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    pub text: String,
    /// Transcription confidence in [0, 1]; 1.0 for hand-authored captions
    pub confidence: f64,
}

impl Segment {
    /// Create a caption with a fresh id and full confidence
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id: new_segment_id(),
            start,
            end,
            text: text.into(),
            confidence: 1.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(AppError::InvalidRange(format!(
                "segment '{}' has start {} >= end {}",
                self.id, self.start, self.end
            )));
        }
        if self.text.is_empty() {
            return Err(AppError::InvalidParameter(format!(
                "segment '{}' has no text",
                self.id
            )));
        }
        Ok(())
    }
}

/// Generate a unique caption id
pub fn new_segment_id() -> String {
    Uuid::new_v4().to_string()
}
