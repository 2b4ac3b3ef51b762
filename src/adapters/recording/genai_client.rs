//! Recording adapters for the `GenAiClient` and `ClientFactory` ports.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::ContentError;
use crate::ports::genai_client::{
    ClientFactory, GenAiClient, GenerateImagesRequest, GenerateImagesResponse,
    GenerateVideosRequest, Operation,
};
use crate::ports::PortFuture;

const PORT: &str = "genai_client";

/// Wraps every client produced by an inner factory in a [`RecordingGenAiClient`].
pub struct RecordingClientFactory {
    inner: Arc<dyn ClientFactory>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClientFactory {
    /// Creates a recording factory around `inner`.
    pub fn new(inner: Arc<dyn ClientFactory>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ClientFactory for RecordingClientFactory {
    fn create(&self, provider: &str, api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError> {
        let inner = self.inner.create(provider, api_key)?;
        Ok(Arc::new(RecordingGenAiClient::new(inner, Arc::clone(&self.recorder))))
    }
}

/// Records client calls while delegating to an inner implementation.
pub struct RecordingGenAiClient {
    inner: Arc<dyn GenAiClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGenAiClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Arc<dyn GenAiClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl GenAiClient for RecordingGenAiClient {
    fn generate_images(
        &self,
        request: &GenerateImagesRequest,
    ) -> PortFuture<'_, GenerateImagesResponse> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate_images(&request).await;
            record_result(&self.recorder, PORT, "generate_images", &request, &result);
            result
        })
    }

    fn generate_videos(&self, request: &GenerateVideosRequest) -> PortFuture<'_, Operation> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate_videos(&request).await;
            record_result(&self.recorder, PORT, "generate_videos", &request, &result);
            result
        })
    }

    fn get_operation(&self, name: &str) -> PortFuture<'_, Operation> {
        let name = name.to_string();
        Box::pin(async move {
            let result = self.inner.get_operation(&name).await;
            let input = serde_json::json!({ "name": name });
            record_result(&self.recorder, PORT, "get_operation", &input, &result);
            result
        })
    }
}
