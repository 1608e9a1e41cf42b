//! # Command System
//!
//! Slash command (/) handling for Discord interactions.
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Note commands routed through the conversation wizard
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial release

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

pub use crate::command_handler::CommandHandler;

pub use context::{chat_user, CommandContext};
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;

pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};
