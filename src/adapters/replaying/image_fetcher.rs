//! Replaying adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::image_fetcher::{FetchedBytes, ImageFetcher};
use crate::ports::PortFuture;

/// Serves recorded downloads from a cassette.
pub struct ReplayingImageFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, _url: &str) -> PortFuture<'_, FetchedBytes> {
        let output = next_output(&self.replayer, "image_fetcher", "fetch");
        Box::pin(async move { replay_result::<FetchedBytes>(output?) })
    }
}
