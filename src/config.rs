//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory for artifacts written without an explicit output path.
    pub output_dir: PathBuf,

    /// Google credentials and endpoint.
    pub google: GoogleSettings,

    /// Video operation polling.
    pub video: VideoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            google: GoogleSettings::default(),
            video: VideoSettings::default(),
        }
    }
}

/// Google Generative Language API configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// API key.
    pub api_key: Option<String>,
    /// Override for the REST base URL.
    pub base_url: Option<String>,
}

/// Polling behaviour for long-running video operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Seconds between operation status checks.
    pub poll_interval_secs: u64,
    /// Give up after this many seconds. Unset means wait indefinitely.
    pub poll_timeout_secs: Option<u64>,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self { poll_interval_secs: 10, poll_timeout_secs: None }
    }
}

impl VideoSettings {
    /// Interval between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Optional overall deadline.
    #[must_use]
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Apply environment overrides, with variables read through `lookup`.
    ///
    /// `GEMINI_API_KEY` (then `GOOGLE_API_KEY`) replaces the API key and
    /// `AI_CONTENT_OUTPUT_DIR` replaces the output directory.
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("GOOGLE_API_KEY")) {
            self.google.api_key = Some(key);
        }
        if let Some(dir) = lookup("AI_CONTENT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    /// The configured API key, treating an empty string as absent.
    #[must_use]
    pub fn google_api_key(&self) -> Option<&str> {
        self.google.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `AI_CONTENT_CONFIG` environment variable
/// 3. `~/.config/ai-content/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("AI_CONTENT_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/ai-content/config.toml")
    } else {
        PathBuf::from("ai-content.toml")
    }
}
