//! ai-content - generate images and videos from the command line.

mod cli;

use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ai_content::config::{self, Settings};
use ai_content::context::ServiceContext;
use ai_content::error::ContentError;
use ai_content::registry::ProviderRegistry;
use ai_content::result::GenerationResult;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Returns whether the requested artifact was generated.
async fn run(cli: Cli) -> Result<bool, ContentError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let settings = Settings::load(&config_path)
        .map_err(ContentError::Config)?
        .apply_env(|name| std::env::var(name).ok());
    let settings = Arc::new(settings);

    let registry = ProviderRegistry::with_builtin();

    if let Command::Providers = cli.command {
        println!("image: {}", registry.image_names().collect::<Vec<_>>().join(", "));
        println!("video: {}", registry.video_names().collect::<Vec<_>>().join(", "));
        return Ok(true);
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("AI_CONTENT_REPLAY").ok();
    let is_recording = std::env::var("AI_CONTENT_REC").is_ok_and(|v| v == "true" || v == "1");

    let (services, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&settings);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&settings), None)
    };

    // Generate; the provider (and its context) is dropped before the recording is finished.
    let result = match cli.command {
        Command::Image(ref args) => {
            let prompt = args.prompt.resolve()?;
            let provider = registry.create_image(&args.provider, Arc::clone(&settings), services)?;
            provider.generate(&prompt, &args.options()).await?
        }
        Command::Video(ref args) => {
            let prompt = args.prompt.resolve()?;
            let provider = registry.create_video(&args.provider, Arc::clone(&settings), services)?;
            provider.generate(&prompt, &args.options()).await?
        }
        Command::Providers => return Ok(true),
    };

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    report(&result, cli.json)
}

fn report(result: &GenerationResult, json: bool) -> Result<bool, ContentError> {
    if json {
        let rendered = serde_json::to_string_pretty(result).map_err(std::io::Error::from)?;
        println!("{rendered}");
    }

    match (result.file_path(), result.error()) {
        (Some(path), _) => {
            eprintln!("Saved: {}", path.display());
            Ok(true)
        }
        (None, error) => {
            eprintln!("Error: {}", error.unwrap_or("generation failed"));
            Ok(false)
        }
    }
}
