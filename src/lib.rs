// Core layer - config, date handling, outbound delivery
pub mod core;

// Features layer - conversation wizard, notes, reminders
pub mod features;

// Persistence
pub mod database;

// Discord presentation
pub mod message_components;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::Config;
pub use database::{Database, Note, User};
pub use features::{ChatEvent, ChatUser, MenuAction, NoteWizard, ReminderScheduler, Reply};
