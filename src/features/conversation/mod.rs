//! # Conversation Feature
//!
//! Per-user dialogue state machine for creating, updating and deleting notes
//! and for arming reminders.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Reminder wizard resets on unknown note id
//! - 1.1.0: Typed menu labels accepted while idle
//! - 1.0.0: Initial release

pub mod events;
pub mod state;
pub mod wizard;

pub use events::{ChatEvent, ChatUser, MenuAction, Reply, MENU_LAYOUT};
pub use state::{ConversationStore, StagedNote, WizardStage};
pub use wizard::NoteWizard;
