use crate::timeline::Segment;
use serde::{Deserialize, Serialize};

/// Persisted projection of an editing session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub source_name: Option<String>,
    pub duration_seconds: f64,
    pub sync_offset: f64,
    pub segments: Vec<Segment>,
    pub waveform: Vec<f32>,
}
