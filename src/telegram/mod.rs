//! Telegram client wrapper module.
//!
//! Wraps the Bot API calls the bot makes behind the [`Messenger`] trait so
//! the pipeline and transports never talk to `teloxide` directly.

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod messenger;

pub use client::{TelegramBot, TelegramError};
pub use messenger::{Messenger, OutgoingDocument};
