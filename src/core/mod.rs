//! # Core Module
//!
//! Configuration, wall-clock handling and outbound delivery shared by every feature.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add messenger module for reminder delivery
//! - 1.1.0: Add datetime module with the strict note date format
//! - 1.0.0: Initial creation with config and response modules

pub mod config;
pub mod datetime;
pub mod messenger;
pub mod response;

pub use config::Config;
pub use datetime::{format_note_datetime, parse_note_datetime, NOTE_DATETIME_HINT};
pub use messenger::{DiscordMessenger, Messenger};
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
