//! Command handling module.
//!
//! The bot answers `/start` and `/help` with fixed texts; everything else it
//! says lives in [`messages`].

pub mod messages;
mod types;

pub use types::BotCommand;
