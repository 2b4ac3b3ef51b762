//! ai-content - generative media providers.
//!
//! Each provider takes a prompt and options, calls a remote service, waits
//! for the result, writes the artifact to disk, and reports the outcome as a
//! [`GenerationResult`](result::GenerationResult).
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ai_content::config::Settings;
//! use ai_content::context::ServiceContext;
//! use ai_content::providers::ImageOptions;
//! use ai_content::registry::ProviderRegistry;
//!
//! # async fn demo() -> Result<(), ai_content::error::ContentError> {
//! let settings = Arc::new(Settings::default().apply_env(|k| std::env::var(k).ok()));
//! let services = ServiceContext::live(&settings);
//! let registry = ProviderRegistry::with_builtin();
//!
//! let imagen = registry.create_image("imagen", settings, services)?;
//! let result = imagen.generate("a lighthouse at dawn", &ImageOptions::default()).await?;
//! if let Some(path) = result.file_path() {
//!     println!("saved {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cassette;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod poll;
pub mod ports;
pub mod providers;
pub mod registry;
pub mod result;

#[cfg(test)]
mod testing;
