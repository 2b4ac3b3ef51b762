//! Name-to-constructor registry for providers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::ContentError;
use crate::providers::google::{GoogleImagenProvider, GoogleVeoProvider};
use crate::providers::{ImageProvider, VideoProvider};

/// Builds an image provider.
pub type ImageFactory = fn(Arc<Settings>, ServiceContext) -> Box<dyn ImageProvider>;

/// Builds a video provider.
pub type VideoFactory = fn(Arc<Settings>, ServiceContext) -> Box<dyn VideoProvider>;

/// Maps provider names to constructors.
#[derive(Default)]
pub struct ProviderRegistry {
    image: BTreeMap<String, ImageFactory>,
    video: BTreeMap<String, VideoFactory>,
}

impl ProviderRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in provider.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        register_builtin(&mut registry);
        registry
    }

    /// Register an image provider under `name`, replacing any previous entry.
    pub fn register_image(&mut self, name: &str, factory: ImageFactory) {
        if self.image.insert(name.to_string(), factory).is_some() {
            tracing::warn!(name, "replaced image provider registration");
        }
    }

    /// Register a video provider under `name`, replacing any previous entry.
    pub fn register_video(&mut self, name: &str, factory: VideoFactory) {
        if self.video.insert(name.to_string(), factory).is_some() {
            tracing::warn!(name, "replaced video provider registration");
        }
    }

    /// Instantiate the image provider registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownProvider`] if nothing is registered under `name`.
    pub fn create_image(
        &self,
        name: &str,
        settings: Arc<Settings>,
        services: ServiceContext,
    ) -> Result<Box<dyn ImageProvider>, ContentError> {
        let factory = self
            .image
            .get(name)
            .ok_or_else(|| ContentError::UnknownProvider { kind: "image", name: name.into() })?;
        Ok(factory(settings, services))
    }

    /// Instantiate the video provider registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownProvider`] if nothing is registered under `name`.
    pub fn create_video(
        &self,
        name: &str,
        settings: Arc<Settings>,
        services: ServiceContext,
    ) -> Result<Box<dyn VideoProvider>, ContentError> {
        let factory = self
            .video
            .get(name)
            .ok_or_else(|| ContentError::UnknownProvider { kind: "video", name: name.into() })?;
        Ok(factory(settings, services))
    }

    /// Registered image provider names, sorted.
    pub fn image_names(&self) -> impl Iterator<Item = &str> {
        self.image.keys().map(String::as_str)
    }

    /// Registered video provider names, sorted.
    pub fn video_names(&self) -> impl Iterator<Item = &str> {
        self.video.keys().map(String::as_str)
    }
}

/// Register the built-in Google providers.
pub fn register_builtin(registry: &mut ProviderRegistry) {
    registry.register_image(GoogleImagenProvider::NAME, build_imagen);
    registry.register_video(GoogleVeoProvider::NAME, build_veo);
}

fn build_imagen(settings: Arc<Settings>, services: ServiceContext) -> Box<dyn ImageProvider> {
    Box::new(GoogleImagenProvider::new(settings, services))
}

fn build_veo(settings: Arc<Settings>, services: ServiceContext) -> Box<dyn VideoProvider> {
    Box::new(GoogleVeoProvider::new(settings, services))
}
