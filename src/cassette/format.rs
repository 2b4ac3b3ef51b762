//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port call in the order it happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the recording build.
    pub commit: String,
    /// Recorded interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One port call and its outcome.
///
/// `output` follows the `{"Ok": value}` / `{"Err": "message"}` convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position within the cassette.
    pub seq: u64,
    /// Port name (e.g., `"genai_client"`).
    pub port: String,
    /// Method name (e.g., `"generate_videos"`).
    pub method: String,
    /// Serialized arguments.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Serialized result.
    pub output: serde_json::Value,
}
