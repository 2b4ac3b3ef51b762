//! Provider interfaces for image and video generation.

pub mod google;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::ContentError;
use crate::result::GenerationResult;

/// Boxed future returned by provider `generate` methods.
///
/// Resolves to `Err` only for configuration problems (missing credentials,
/// unavailable client). Every per-call failure is reported as a failed
/// [`GenerationResult`] instead.
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResult, ContentError>> + Send + 'a>>;

/// Options for image generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    /// Aspect ratio passed to the vendor untouched.
    pub aspect_ratio: String,
    /// Number of images to request. Only the first is saved.
    pub num_images: u32,
    /// Destination file. Defaults to a timestamped name under the output directory.
    pub output_path: Option<PathBuf>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self { aspect_ratio: "16:9".into(), num_images: 1, output_path: None }
    }
}

/// Options for video generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOptions {
    /// Aspect ratio passed to the vendor untouched.
    pub aspect_ratio: String,
    /// Requested clip length. Advisory.
    pub duration_seconds: u32,
    /// Image to use as the first frame.
    pub first_frame_url: Option<String>,
    /// Destination file. Defaults to a timestamped name under the output directory.
    pub output_path: Option<PathBuf>,
    /// Prefer a faster, lower-quality model. Advisory.
    pub use_fast_model: bool,
    /// Person generation policy.
    pub person_generation: String,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".into(),
            duration_seconds: 5,
            first_frame_url: None,
            output_path: None,
            use_fast_model: false,
            person_generation: "allow_adult".into(),
        }
    }
}

/// Generates still images from text prompts.
pub trait ImageProvider: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// Generate an image and save it to disk.
    fn generate<'a>(&'a self, prompt: &'a str, options: &'a ImageOptions) -> GenerateFuture<'a>;
}

/// Generates video clips from text prompts, optionally seeded by an image.
pub trait VideoProvider: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// Whether `first_frame_url` is honoured.
    fn supports_image_to_video(&self) -> bool;

    /// Longest clip the backing model produces. Advisory only.
    fn max_duration_seconds(&self) -> u32;

    /// Generate a video and save it to disk.
    fn generate<'a>(&'a self, prompt: &'a str, options: &'a VideoOptions) -> GenerateFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_defaults() {
        let image = ImageOptions::default();
        assert_eq!(image.aspect_ratio, "16:9");
        assert_eq!(image.num_images, 1);
        assert!(image.output_path.is_none());

        let video = VideoOptions::default();
        assert_eq!(video.aspect_ratio, "16:9");
        assert_eq!(video.duration_seconds, 5);
        assert!(video.first_frame_url.is_none());
        assert!(!video.use_fast_model);
        assert_eq!(video.person_generation, "allow_adult");
    }
}
