//! Application settings loaded from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime settings for the bot.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Bot API token (obtain from @BotFather).
    pub token: String,

    /// Public base URL the webhook is registered under.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Port the webhook server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the source image for thumbnails.
    #[serde(default = "default_thumbnail_path")]
    pub thumbnail_path: PathBuf,

    /// Path to the newline-delimited list of words to strip.
    #[serde(default = "default_words_path")]
    pub words_path: PathBuf,

    /// Directory for temporary downloads.
    #[serde(default = "std::env::temp_dir")]
    pub temp_dir: PathBuf,
}

fn default_base_url() -> String {
    "https://groky.onrender.com".to_owned()
}

const fn default_port() -> u16 {
    8443
}

fn default_thumbnail_path() -> PathBuf {
    PathBuf::from("thumbnail.jpg")
}

fn default_words_path() -> PathBuf {
    PathBuf::from("words_to_remove.txt")
}

impl Settings {
    /// Creates settings with defaults for everything but the token.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token,
            base_url: default_base_url(),
            port: default_port(),
            thumbnail_path: default_thumbnail_path(),
            words_path: default_words_path(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Creates settings from environment variables.
    ///
    /// `TELEGRAM_TOKEN` is required. `BASE_URL`, `PORT`, `THUMBNAIL_PATH`,
    /// `WORDS_FILE_PATH` and `TEMP_DIR` fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `TELEGRAM_TOKEN` is missing or `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("TELEGRAM_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar("TELEGRAM_TOKEN"))?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => default_port(),
        };

        Ok(Self {
            token,
            base_url: std::env::var("BASE_URL").unwrap_or_else(|_| default_base_url()),
            port,
            thumbnail_path: std::env::var("THUMBNAIL_PATH")
                .map_or_else(|_| default_thumbnail_path(), PathBuf::from),
            words_path: std::env::var("WORDS_FILE_PATH")
                .map_or_else(|_| default_words_path(), PathBuf::from),
            temp_dir: std::env::var("TEMP_DIR").map_or_else(|_| std::env::temp_dir(), PathBuf::from),
        })
    }

    /// Builds the URL Telegram should deliver updates to: `<base_url>/<token>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not https or does not parse.
    pub fn webhook_url(&self) -> Result<Url, ConfigError> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), self.token);
        if !raw.starts_with("https://") {
            return Err(ConfigError::InsecureBaseUrl(self.base_url.clone()));
        }
        Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl(self.base_url.clone(), e))
    }

    /// Returns the webhook URL with the token masked, for logging.
    #[must_use]
    pub fn masked_webhook_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), mask_token(&self.token))
    }

    /// Checks that the thumbnail source exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if it does not.
    pub fn ensure_thumbnail(&self) -> Result<&Path, ConfigError> {
        if self.thumbnail_path.is_file() {
            Ok(&self.thumbnail_path)
        } else {
            Err(ConfigError::MissingFile(self.thumbnail_path.clone()))
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("token", &mask_token(&self.token))
            .field("base_url", &self.base_url)
            .field("port", &self.port)
            .field("thumbnail_path", &self.thumbnail_path)
            .field("words_path", &self.words_path)
            .field("temp_dir", &self.temp_dir)
            .finish()
    }
}

/// Masks a bot token for logging (keeps the numeric bot id).
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) => format!("{bot_id}:***"),
        None => "***".to_owned(),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid PORT value '{0}' (must be 0-65535)")]
    InvalidPort(String),

    #[error("BASE_URL must start with https:// (got '{0}')")]
    InsecureBaseUrl(String),

    #[error("Invalid BASE_URL '{0}': {1}")]
    InvalidBaseUrl(String, #[source] url::ParseError),

    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),
}
