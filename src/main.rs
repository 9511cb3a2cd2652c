//! OldTown File Bot - Main Entry Point
//!
//! A Telegram bot that strips configured words from document filenames,
//! attaches a fixed thumbnail and sends the document back.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use oldtown_file_bot::app::AppContext;
use oldtown_file_bot::config::Settings;
use oldtown_file_bot::naming::WordList;
use oldtown_file_bot::telegram::TelegramBot;
use oldtown_file_bot::thumbnail::ThumbnailPreparer;
use oldtown_file_bot::transport::{self, TransportMode};

/// Telegram bot that cleans and brands document filenames.
#[derive(Parser, Debug)]
#[command(name = "oldtown_bot")]
#[command(about = "Send back documents with cleaned names and the OldTown thumbnail")]
#[command(version)]
struct Args {
    /// How updates are received.
    #[arg(short, long, value_enum, default_value_t = TransportMode::Webhook)]
    mode: TransportMode,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings =
        Settings::from_env().context("Failed to load bot configuration from environment")?;
    debug!("Settings: {:?}", settings);

    let thumbnail = settings
        .ensure_thumbnail()
        .context("Thumbnail image is required")?;

    if args.mode == TransportMode::Webhook {
        settings
            .webhook_url()
            .context("Invalid webhook configuration")?;
    }

    let words = load_words(&settings, args.mode)?;

    let bot = TelegramBot::new(settings.token.clone());
    let ctx = Arc::new(AppContext::new(
        Arc::new(bot.clone()),
        ThumbnailPreparer::new(thumbnail),
        words,
        settings.temp_dir.clone(),
        settings.token.clone(),
    ));

    info!("Starting OldTown bot in {:?} mode...", args.mode);

    transport::run(args.mode, ctx, &bot, &settings)
        .await
        .context("Bot stopped with an error")?;

    info!("Bot stopped");
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the word list. Required for the webhook; polling runs without it.
fn load_words(settings: &Settings, mode: TransportMode) -> Result<Option<Arc<WordList>>> {
    match WordList::load_from_file(&settings.words_path) {
        Ok(words) => {
            info!(
                "Loaded {} words to strip from {}",
                words.len(),
                settings.words_path.display()
            );
            Ok(Some(Arc::new(words)))
        }
        Err(e) if mode == TransportMode::Webhook => Err(e).with_context(|| {
            format!(
                "Failed to load word list from {}",
                settings.words_path.display()
            )
        }),
        Err(e) => {
            warn!(
                "Word list {} unavailable ({}); filenames will only be branded",
                settings.words_path.display(),
                e
            );
            Ok(None)
        }
    }
}
