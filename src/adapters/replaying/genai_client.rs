//! Replaying adapters for the `GenAiClient` and `ClientFactory` ports.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ContentError;
use crate::ports::genai_client::{
    ClientFactory, GenAiClient, GenerateImagesRequest, GenerateImagesResponse,
    GenerateVideosRequest, Operation,
};
use crate::ports::PortFuture;

const PORT: &str = "genai_client";

/// Hands out clients that share one cassette, ignoring the API key.
pub struct ReplayingClientFactory {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingClientFactory {
    /// Create a factory backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ClientFactory for ReplayingClientFactory {
    fn create(&self, _provider: &str, _api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError> {
        Ok(Arc::new(ReplayingGenAiClient { replayer: Arc::clone(&self.replayer) }))
    }
}

/// Serves recorded client results from a cassette.
pub struct ReplayingGenAiClient {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl GenAiClient for ReplayingGenAiClient {
    fn generate_images(
        &self,
        _request: &GenerateImagesRequest,
    ) -> PortFuture<'_, GenerateImagesResponse> {
        let output = next_output(&self.replayer, PORT, "generate_images");
        Box::pin(async move { replay_result::<GenerateImagesResponse>(output?) })
    }

    fn generate_videos(&self, _request: &GenerateVideosRequest) -> PortFuture<'_, Operation> {
        let output = next_output(&self.replayer, PORT, "generate_videos");
        Box::pin(async move { replay_result::<Operation>(output?) })
    }

    fn get_operation(&self, _name: &str) -> PortFuture<'_, Operation> {
        let output = next_output(&self.replayer, PORT, "get_operation");
        Box::pin(async move { replay_result::<Operation>(output?) })
    }
}
