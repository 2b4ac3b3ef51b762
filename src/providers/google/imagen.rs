//! Google Imagen image provider.

use std::sync::Arc;

use super::LazyClient;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::ContentError;
use crate::output::{resolve_output_path, write_artifact};
use crate::ports::genai_client::{GenAiClient, GenerateImagesConfig, GenerateImagesRequest};
use crate::providers::{GenerateFuture, ImageOptions, ImageProvider};
use crate::result::{ContentType, GenerationResult};

/// Model used for every request.
pub const IMAGEN_MODEL: &str = "imagen-3.0-generate-002";

/// Image provider backed by Google Imagen.
pub struct GoogleImagenProvider {
    settings: Arc<Settings>,
    services: ServiceContext,
    client: LazyClient,
}

impl GoogleImagenProvider {
    /// Registry name.
    pub const NAME: &'static str = "imagen";

    /// Create a provider; the remote client is built on first use.
    #[must_use]
    pub fn new(settings: Arc<Settings>, services: ServiceContext) -> Self {
        let client = LazyClient::new(Self::NAME, Arc::clone(&services.clients));
        Self { settings, services, client }
    }

    async fn run(
        &self,
        client: &dyn GenAiClient,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<GenerationResult, ContentError> {
        if options.num_images == 0 {
            return Err(ContentError::InvalidArgument("num_images must be at least 1".into()));
        }

        let request = GenerateImagesRequest {
            model: IMAGEN_MODEL.to_string(),
            prompt: prompt.to_string(),
            config: GenerateImagesConfig {
                number_of_images: options.num_images,
                aspect_ratio: options.aspect_ratio.clone(),
            },
        };
        let response = client.generate_images(&request).await?;

        let Some(first) = response.generated_images.into_iter().next() else {
            return Ok(GenerationResult::failure(
                Self::NAME,
                ContentType::Image,
                "No images generated",
            ));
        };

        let file_path = resolve_output_path(
            options.output_path.as_deref(),
            &self.settings.output_dir,
            Self::NAME,
            ContentType::Image,
            self.services.clock.now(),
        );
        write_artifact(&file_path, &first.image.image_bytes).await?;
        tracing::info!(path = %file_path.display(), "Imagen: saved image");

        Ok(GenerationResult::success(Self::NAME, ContentType::Image, file_path)
            .with_metadata("aspect_ratio", options.aspect_ratio.as_str())
            .with_metadata("model", IMAGEN_MODEL))
    }
}

impl ImageProvider for GoogleImagenProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn generate<'a>(&'a self, prompt: &'a str, options: &'a ImageOptions) -> GenerateFuture<'a> {
        Box::pin(async move {
            let client = self.client.get(&self.settings).await?;

            tracing::info!(
                aspect_ratio = %options.aspect_ratio,
                model = IMAGEN_MODEL,
                "Imagen: generating image"
            );

            match self.run(client.as_ref(), prompt, options).await {
                Ok(result) => Ok(result),
                Err(e) => {
                    tracing::error!(error = %e, "Imagen generation failed");
                    Ok(GenerationResult::failure(Self::NAME, ContentType::Image, e.to_string()))
                }
            }
        })
    }
}
