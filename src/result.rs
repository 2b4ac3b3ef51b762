//! Outcome of a single generation call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Kind of media a provider produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

impl ContentType {
    /// Tag used in results and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// File extension for default output paths.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Image => "png",
            Self::Video => "mp4",
        }
    }
}

/// Success or failure descriptor returned by every provider.
///
/// A successful result always carries a file path and never an error; a
/// failed one always carries an error and never a path.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    success: bool,
    provider: String,
    content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<PathBuf>,
    #[serde(rename = "data_len", serialize_with = "data_len", skip_serializing_if = "Option::is_none")]
    data: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl GenerationResult {
    /// A successful result for an artifact written to `file_path`.
    pub fn success(
        provider: impl Into<String>,
        content_type: ContentType,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            success: true,
            provider: provider.into(),
            content_type,
            file_path: Some(file_path.into()),
            data: None,
            error: None,
            metadata: BTreeMap::new(),
        }
    }

    /// A failed result carrying `error`.
    pub fn failure(
        provider: impl Into<String>,
        content_type: ContentType,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            provider: provider.into(),
            content_type,
            file_path: None,
            data: None,
            error: Some(error.into()),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach the raw artifact bytes.
    #[must_use]
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the artifact was generated and saved.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Name of the provider that produced this result.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Kind of media requested.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Where the artifact was written.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Raw artifact bytes, when the provider keeps them.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Failure message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Request details such as model and aspect ratio.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

#[allow(clippy::ref_option)]
fn data_len<S: Serializer>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match data {
        Some(bytes) => serializer.serialize_some(&bytes.len()),
        None => serializer.serialize_none(),
    }
}
