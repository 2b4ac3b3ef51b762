//! Replaying adapters that serve recorded interactions from cassettes.

pub mod genai_client;
pub mod image_fetcher;
pub mod sleeper;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ContentError;

/// Retrieve the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, ContentError> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output.clone())
        .map_err(ContentError::Replay)
}

/// Deserialize a replayed output recorded under the Ok/Err convention.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ContentError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(ContentError::Replay(msg));
    }
    let value = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(ok_val) => ok_val.clone(),
        None => output,
    };
    serde_json::from_value(value)
        .map_err(|e| ContentError::Replay(format!("Malformed cassette output: {e}")))
}
