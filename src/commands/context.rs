//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Carry the note wizard instead of individual services
//! - 1.0.0: Initial implementation with core shared state

use serenity::model::user::User;

use crate::features::conversation::{ChatUser, NoteWizard};

/// Shared context for all command handlers
///
/// Everything a handler needs goes through the [`NoteWizard`]; the database,
/// conversation store and reminder scheduler hang off it.
#[derive(Clone)]
pub struct CommandContext {
    pub wizard: NoteWizard,
}

impl CommandContext {
    pub fn new(wizard: NoteWizard) -> Self {
        Self { wizard }
    }
}

/// Map a Discord author onto the chat user the wizard works with
pub fn chat_user(user: &User) -> ChatUser {
    ChatUser::new(user.id.to_string(), user.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
