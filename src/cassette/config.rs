//! Cassette loading for replay mode.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
    tracing::debug!(
        name = %cassette.name,
        interactions = cassette.interactions.len(),
        "loaded cassette"
    );
    Ok(CassetteReplayer::new(&cassette))
}
