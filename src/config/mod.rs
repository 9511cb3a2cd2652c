//! Configuration module for the bot.
//!
//! Handles loading and validation of runtime settings: the bot token,
//! webhook address and the paths of the static inputs.

mod settings;

pub use settings::{ConfigError, Settings};
