//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_fetcher::{FetchedBytes, ImageFetcher};
use crate::ports::PortFuture;

/// Records downloads while delegating to an inner fetcher.
pub struct RecordingImageFetcher {
    inner: Arc<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Arc<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, url: &str) -> PortFuture<'_, FetchedBytes> {
        let url = url.to_string();
        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            let input = serde_json::json!({ "url": url });
            record_result(&self.recorder, "image_fetcher", "fetch", &input, &result);
            result
        })
    }
}
