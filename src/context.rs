//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::live::clock::{SystemClock, TokioSleeper};
use crate::adapters::live::google::GoogleClientFactory;
use crate::adapters::live::http_fetcher::HttpImageFetcher;
use crate::adapters::recording::genai_client::RecordingClientFactory;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::replaying::genai_client::ReplayingClientFactory;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::adapters::replaying::sleeper::InstantSleeper;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Settings;
use crate::error::ContentError;
use crate::ports::{ClientFactory, Clock, ImageFetcher, Sleeper};

/// Bundles all port trait objects into a single context.
///
/// Cloning is cheap; every provider instance keeps its own copy.
#[derive(Clone)]
pub struct ServiceContext {
    /// Builds remote clients from an API key.
    pub clients: Arc<dyn ClientFactory>,
    /// Downloads reference frames.
    pub fetcher: Arc<dyn ImageFetcher>,
    /// Timestamps for default file names and poll deadlines.
    pub clock: Arc<dyn Clock>,
    /// Waits between operation polls.
    pub sleeper: Arc<dyn Sleeper>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Providers built from the recording context must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to the configured Google endpoint.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            clients: Arc::new(GoogleClientFactory::new(settings.google.base_url.as_deref())),
            fetcher: Arc::new(HttpImageFetcher),
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    #[must_use]
    pub fn recording(settings: &Settings) -> (Self, RecordingSession) {
        let live = Self::live(settings);

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".ai-content/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-session"),
            get_commit_hash(),
        )));

        let ctx = Self {
            clients: Arc::new(RecordingClientFactory::new(live.clients, Arc::clone(&recorder))),
            fetcher: Arc::new(RecordingImageFetcher::new(live.fetcher, Arc::clone(&recorder))),
            clock: live.clock,
            sleeper: live.sleeper,
        };
        (ctx, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ContentError> {
        let replayer = load_cassette(path)
            .map_err(|e| ContentError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            clients: Arc::new(ReplayingClientFactory::new(Arc::clone(&replayer))),
            fetcher: Arc::new(ReplayingImageFetcher::new(replayer)),
            clock: Arc::new(SystemClock),
            sleeper: Arc::new(InstantSleeper),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
