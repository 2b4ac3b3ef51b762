//! Google providers: Imagen for images, Veo for videos.

pub mod imagen;
pub mod veo;

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::Settings;
use crate::error::ContentError;
use crate::ports::{ClientFactory, GenAiClient};

pub use imagen::GoogleImagenProvider;
pub use veo::GoogleVeoProvider;

/// Client handle created on first use and kept for the provider's lifetime.
pub(crate) struct LazyClient {
    provider: &'static str,
    factory: Arc<dyn ClientFactory>,
    cell: OnceCell<Arc<dyn GenAiClient>>,
}

impl LazyClient {
    pub(crate) fn new(provider: &'static str, factory: Arc<dyn ClientFactory>) -> Self {
        Self { provider, factory, cell: OnceCell::new() }
    }

    /// Return the cached client, creating it with the configured key if needed.
    ///
    /// The key is checked before the factory is consulted, so a missing key
    /// never reaches the network.
    pub(crate) async fn get(&self, settings: &Settings) -> Result<Arc<dyn GenAiClient>, ContentError> {
        let client = self
            .cell
            .get_or_try_init(|| async {
                let api_key = settings
                    .google_api_key()
                    .ok_or_else(|| ContentError::Authentication { provider: self.provider.into() })?;
                tracing::debug!(provider = self.provider, "creating Google client");
                self.factory.create(self.provider, api_key)
            })
            .await?;
        Ok(Arc::clone(client))
    }
}
