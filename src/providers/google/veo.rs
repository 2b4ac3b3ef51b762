//! Google Veo video provider.

use std::sync::Arc;

use super::LazyClient;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::ContentError;
use crate::output::{resolve_output_path, write_artifact};
use crate::poll::{wait_for_operation, PollPolicy};
use crate::ports::genai_client::{GenAiClient, GenerateVideosConfig, GenerateVideosRequest, Image};
use crate::providers::{GenerateFuture, VideoOptions, VideoProvider};
use crate::result::{ContentType, GenerationResult};

/// Model used for every request.
pub const VEO_MODEL: &str = "veo-3.1-generate-001";

/// Video provider backed by Google Veo.
pub struct GoogleVeoProvider {
    settings: Arc<Settings>,
    services: ServiceContext,
    client: LazyClient,
}

impl GoogleVeoProvider {
    /// Registry name.
    pub const NAME: &'static str = "veo";
    /// Veo can start from a reference frame.
    pub const SUPPORTS_IMAGE_TO_VIDEO: bool = true;
    /// Longest clip Veo produces.
    pub const MAX_DURATION_SECONDS: u32 = 8;

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
        options: &VideoOptions,
    ) -> Result<GenerationResult, ContentError> {
        let image = match options.first_frame_url.as_deref() {
            Some(url) => {
                let fetched = self.services.fetcher.fetch(url).await?;
                Some(Image { image_bytes: fetched.0, mime_type: None })
            }
            None => None,
        };

        let request = GenerateVideosRequest {
            model: VEO_MODEL.to_string(),
            prompt: prompt.to_string(),
            image,
            config: GenerateVideosConfig {
                aspect_ratio: options.aspect_ratio.clone(),
                person_generation: options.person_generation.clone(),
            },
        };
        let operation = client.generate_videos(&request).await?;

        tracing::info!(operation = %operation.name, "Veo: waiting for generation");
        let policy = PollPolicy::from(&self.settings.video);
        let operation = wait_for_operation(
            client,
            operation,
            &policy,
            self.services.clock.as_ref(),
            self.services.sleeper.as_ref(),
        )
        .await?;

        if let Some(ref error) = operation.error {
            tracing::warn!(
                operation = %operation.name,
                code = ?error.code,
                message = error.message.as_deref().unwrap_or_default(),
                "Veo operation reported an error"
            );
        }

        let first = operation.response.and_then(|r| r.generated_videos.into_iter().next());
        let Some(generated) = first else {
            return Ok(GenerationResult::failure(
                Self::NAME,
                ContentType::Video,
                "No video generated",
            ));
        };
        let video_data = generated.video.video_bytes;

        let file_path = resolve_output_path(
            options.output_path.as_deref(),
            &self.settings.output_dir,
            Self::NAME,
            ContentType::Video,
            self.services.clock.now(),
        );
        write_artifact(&file_path, &video_data).await?;
        tracing::info!(path = %file_path.display(), "Veo: saved video");

        Ok(GenerationResult::success(Self::NAME, ContentType::Video, file_path)
            .with_data(video_data)
            .with_metadata("aspect_ratio", options.aspect_ratio.as_str())
            .with_metadata("model", VEO_MODEL)
            .with_metadata("prompt", prompt))
    }
}

impl VideoProvider for GoogleVeoProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports_image_to_video(&self) -> bool {
        Self::SUPPORTS_IMAGE_TO_VIDEO
    }

    fn max_duration_seconds(&self) -> u32 {
        Self::MAX_DURATION_SECONDS
    }

    fn generate<'a>(&'a self, prompt: &'a str, options: &'a VideoOptions) -> GenerateFuture<'a> {
        Box::pin(async move {
            let client = self.client.get(&self.settings).await?;

            tracing::info!(
                aspect_ratio = %options.aspect_ratio,
                duration_seconds = options.duration_seconds,
                use_fast_model = options.use_fast_model,
                model = VEO_MODEL,
                "Veo: generating video"
            );

            match self.run(client.as_ref(), prompt, options).await {
                Ok(result) => Ok(result),
                Err(e) => {
                    tracing::error!(error = %e, "Veo generation failed");
                    Ok(GenerationResult::failure(Self::NAME, ContentType::Video, e.to_string()))
                }
            }
        })
    }
}
