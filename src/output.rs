//! Output path resolution and artifact persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::ContentError;
use crate::result::ContentType;

/// Default file name: `{provider}_{YYYYMMDD_HHMMSS}.{ext}` in UTC.
///
/// Two calls within the same second produce the same name.
#[must_use]
pub fn default_file_name(provider: &str, content_type: ContentType, now: DateTime<Utc>) -> String {
    format!("{provider}_{}.{}", now.format("%Y%m%d_%H%M%S"), content_type.extension())
}

/// Resolve the output path: use explicit path or generate one under `output_dir`.
#[must_use]
pub fn resolve_output_path(
    explicit: Option<&Path>,
    output_dir: &Path,
    provider: &str,
    content_type: ContentType,
    now: DateTime<Utc>,
) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => output_dir.join(default_file_name(provider, content_type, now)),
    }
}

/// Write `data` to `path`, creating missing parent directories first.
/// Existing files are overwritten.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be written.
pub async fn write_artifact(path: &Path, data: &[u8]) -> Result<(), ContentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, data).await?;
    Ok(())
}
