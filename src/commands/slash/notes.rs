//! Note slash commands: /start, /create, /view, /update, /delete, /remind

use serenity::builder::CreateApplicationCommand;

/// Name and description of every note command, in menu order
const NOTE_COMMANDS: &[(&str, &str)] = &[
    ("start", "Say hello and show the main menu"),
    ("create", "Create a new note"),
    ("view", "List your upcoming notes"),
    ("update", "Change the title, content or date of a note"),
    ("delete", "Delete one of your notes"),
    ("remind", "Get a direct message reminder about a note"),
];

/// Creates note commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    NOTE_COMMANDS
        .iter()
        .map(|(name, description)| create_note_command(name, description))
        .collect()
}

/// Note commands take no options; the dialogue continues in DMs
fn create_note_command(name: &str, description: &str) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .description(description)
        .dm_permission(true)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_commands_allowed_in_dms() {
        for cmd in create_commands() {
            assert_eq!(cmd.0.get("dm_permission").and_then(|v| v.as_bool()), Some(true));
        }
    }

    #[test]
    fn test_descriptions_within_discord_limit() {
        for (_, description) in NOTE_COMMANDS {
            assert!(description.len() <= 100);
        }
    }
}
