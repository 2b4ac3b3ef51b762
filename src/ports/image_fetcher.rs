//! Image fetcher port for reference frames hosted over HTTP.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Bytes downloaded by an [`ImageFetcher`], base64 encoded in cassettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedBytes(#[serde(with = "super::base64_bytes")] pub Vec<u8>);

/// Downloads a resource with a single GET request.
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url`, failing on any non-2xx status.
    fn fetch(&self, url: &str) -> PortFuture<'_, FetchedBytes>;
}
