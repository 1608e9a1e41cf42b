//! # Features
//!
//! - `conversation`: per-user note wizards
//! - `notes`: note fields, validation and listing layout
//! - `reminders`: one-shot reminder scheduling

pub mod conversation;
pub mod notes;
pub mod reminders;

pub use conversation::{ChatEvent, ChatUser, ConversationStore, MenuAction, NoteWizard, Reply};
pub use notes::{format_note_listing, validate_title, NoteField};
pub use reminders::{ReminderScheduler, ScheduleOutcome};

/// Bot version, as shown in the ready log
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
