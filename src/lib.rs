//! OldTown File Bot Library
//!
//! A Telegram bot that sends documents back with cleaned, branded names.
//!
//! This crate provides the core functionality for:
//! - Loading the word list and cleaning filenames
//! - Rendering the fixed JPEG thumbnail
//! - Running documents through download, rename and upload
//! - Receiving updates by long polling or webhook

pub mod app;
pub mod commands;
pub mod config;
pub mod naming;
pub mod pipeline;
pub mod telegram;
pub mod thumbnail;
pub mod transport;
