//! Live adapter that downloads reference images over HTTP.

use reqwest::Client;

use crate::ports::image_fetcher::{FetchedBytes, ImageFetcher};
use crate::ports::PortFuture;

/// Fetches images with a short-lived `reqwest` client per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpImageFetcher;

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> PortFuture<'_, FetchedBytes> {
        let url = url.to_string();
        Box::pin(async move {
            let client = Client::new();
            let response = client.get(&url).send().await?.error_for_status()?;
            let bytes = response.bytes().await?;
            tracing::debug!(%url, len = bytes.len(), "fetched reference image");
            Ok(FetchedBytes(bytes.to_vec()))
        })
    }
}
