//! Generative media client port for the remote image/video service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::PortFuture;
use crate::error::ContentError;

/// Binary image payload sent to or received from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Raw image bytes (decoded from base64).
    #[serde(with = "super::base64_bytes")]
    pub image_bytes: Vec<u8>,
    /// MIME type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Options for an image generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImagesConfig {
    /// Number of images to request.
    pub number_of_images: u32,
    /// Aspect ratio (e.g., `"16:9"`), passed through untouched.
    pub aspect_ratio: String,
}

/// A request to generate images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImagesRequest {
    /// Model identifier.
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Generation options.
    pub config: GenerateImagesConfig,
}

/// One generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// The image payload.
    pub image: Image,
}

/// Response to [`GenAiClient::generate_images`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImagesResponse {
    /// Generated images, possibly empty when the service filtered all of them.
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

/// Options for a video generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideosConfig {
    /// Aspect ratio (e.g., `"16:9"`).
    pub aspect_ratio: String,
    /// Person generation policy (e.g., `"allow_adult"`).
    pub person_generation: String,
}

/// A request to generate videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideosRequest {
    /// Model identifier.
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Optional first frame to seed the video from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Generation options.
    pub config: GenerateVideosConfig,
}

/// Video payload of a finished operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Raw video bytes.
    #[serde(with = "super::base64_bytes")]
    pub video_bytes: Vec<u8>,
    /// MIME type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One generated video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedVideo {
    /// The video payload.
    pub video: Video,
}

/// Result carried by a completed video operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateVideosResponse {
    /// Generated videos, possibly empty.
    #[serde(default)]
    pub generated_videos: Vec<GeneratedVideo>,
}

/// Error reported by a completed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    /// Status code, if given.
    #[serde(default)]
    pub code: Option<i32>,
    /// Human-readable message, if given.
    #[serde(default)]
    pub message: Option<String>,
}

/// Handle to a long-running remote job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Resource name used to re-fetch the operation.
    pub name: String,
    /// Whether the job reached a terminal state.
    #[serde(default)]
    pub done: bool,
    /// Result, once done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<GenerateVideosResponse>,
    /// Failure details, once done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Remote generative media service.
pub trait GenAiClient: Send + Sync {
    /// Generate images for the given request.
    fn generate_images(
        &self,
        request: &GenerateImagesRequest,
    ) -> PortFuture<'_, GenerateImagesResponse>;

    /// Start a video generation job.
    fn generate_videos(&self, request: &GenerateVideosRequest) -> PortFuture<'_, Operation>;

    /// Re-fetch an operation by its resource name.
    fn get_operation(&self, name: &str) -> PortFuture<'_, Operation>;
}

/// Builds [`GenAiClient`] sessions from an API key.
pub trait ClientFactory: Send + Sync {
    /// Create a client authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Provider`] if the client cannot be constructed.
    fn create(&self, provider: &str, api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError>;
}
