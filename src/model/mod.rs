// src/model/mod.rs
use serde::Deserialize;
use std::collections::HashMap;

/// Process id (y-axis category) to display name lookup.
///
/// The backend serializes this as a JSON object, so the integer keys arrive
/// as decimal strings; serde_json parses them back to integers.
pub type ProcessMapping = HashMap<i64, String>;

/// One plotted observation derived from a log entry.
///
/// `x` is the hour of day (0-24, fractional), `y` the categorical process
/// id. The backend may attach extra fields (e.g. a row id); they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LogPoint {
    pub x: f64,
    pub y: f64,
    pub original_log: String,
}

/// Body of a successful `GET /api/load_data` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse {
    pub points: Vec<LogPoint>,
    pub process_mapping: ProcessMapping,
}

/// Body of a successful `POST /api/analyze` response, tagged by `type`.
///
/// Only `anomaly` has a rendering effect. Any other tag deserializes to
/// `Unknown` so future backend analysis types are a no-op rather than an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    Anomaly { labels: Vec<u8> },
    #[serde(other)]
    Unknown,
}
