//! CLI argument parsing with clap.

use std::path::PathBuf;

use ai_content::providers::{ImageOptions, VideoOptions};
use clap::{Args, Parser, Subcommand};

/// Generate images and videos with Google Imagen and Veo.
#[derive(Parser, Debug)]
#[command(name = "ai-content", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Print the full result as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to generate.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an image.
    Image(ImageArgs),
    /// Generate a video.
    Video(VideoArgs),
    /// List registered providers.
    Providers,
}

/// Prompt given inline or from a file.
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Text prompt describing the desired media.
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,
}

/// Arguments for `image`.
#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(flatten)]
    pub prompt: PromptArgs,

    /// Registered image provider.
    #[arg(long, default_value = "imagen")]
    pub provider: String,

    /// Aspect ratio (e.g., 1:1, 16:9, 9:16).
    #[arg(short, long, default_value = "16:9")]
    pub aspect_ratio: String,

    /// Number of images to request; only the first is saved.
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_images: u32,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `video`.
#[derive(Args, Debug)]
pub struct VideoArgs {
    #[command(flatten)]
    pub prompt: PromptArgs,

    /// Registered video provider.
    #[arg(long, default_value = "veo")]
    pub provider: String,

    /// Aspect ratio (e.g., 16:9, 9:16).
    #[arg(short, long, default_value = "16:9")]
    pub aspect_ratio: String,

    /// Requested duration in seconds.
    #[arg(short, long, default_value = "5")]
    pub duration: u32,

    /// URL of an image to use as the first frame.
    #[arg(long)]
    pub first_frame_url: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefer the faster model variant.
    #[arg(long)]
    pub fast: bool,

    /// Person generation policy: allow_all, allow_adult, dont_allow.
    #[arg(long, default_value = "allow_adult")]
    pub person_generation: String,
}

impl PromptArgs {
    /// Resolve the prompt from either the positional argument or the file flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither prompt nor prompt-file is provided,
    /// or if the file cannot be read.
    pub fn resolve(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path).map(|s| s.trim_end().to_string())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a prompt string or use -p/--prompt-file",
            ))
        }
    }
}

impl ImageArgs {
    /// Provider options for these arguments.
    pub fn options(&self) -> ImageOptions {
        ImageOptions {
            aspect_ratio: self.aspect_ratio.clone(),
            num_images: self.num_images,
            output_path: self.output.clone(),
        }
    }
}

impl VideoArgs {
    /// Provider options for these arguments.
    pub fn options(&self) -> VideoOptions {
        VideoOptions {
            aspect_ratio: self.aspect_ratio.clone(),
            duration_seconds: self.duration,
            first_frame_url: self.first_frame_url.clone(),
            output_path: self.output.clone(),
            use_fast_model: self.fast,
            person_generation: self.person_generation.clone(),
        }
    }
}
