//! Unified error type for ai-content.

use thiserror::Error;

/// Errors that can occur while generating media.
///
/// Only [`ContentError::Authentication`] and [`ContentError::Provider`] ever
/// escape a provider's `generate`; every other variant is folded into a
/// failed [`GenerationResult`](crate::result::GenerationResult).
#[derive(Debug, Error)]
pub enum ContentError {
    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set GEMINI_API_KEY or add google.api_key to the config file.")]
    Authentication {
        /// The provider name.
        provider: String,
    },

    /// The vendor client could not be constructed.
    #[error("Provider {provider} unavailable: {message}")]
    Provider {
        /// The provider name.
        provider: String,
        /// Why the client is unavailable.
        message: String,
    },

    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A long-running operation did not finish before the configured deadline.
    #[error("Operation {operation} still running after {waited_secs}s")]
    Timeout {
        /// Operation resource name.
        operation: String,
        /// Seconds spent waiting.
        waited_secs: u64,
    },

    /// A replayed interaction failed or the cassette ran out.
    #[error("{0}")]
    Replay(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// A caller-supplied option is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No provider registered under the requested name.
    #[error("Unknown {kind} provider '{name}'")]
    UnknownProvider {
        /// `"image"` or `"video"`.
        kind: &'static str,
        /// The requested name.
        name: String,
    },
}

impl ContentError {
    /// Whether this error describes a setup problem rather than a failed call.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Provider { .. })
    }
}
