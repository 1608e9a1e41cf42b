//! Normalized chat events
//!
//! Slash commands, button clicks, typed menu labels and free text all arrive
//! at the wizard as a single [`ChatEvent`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Named actions reachable from commands and the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Start,
    CreateNote,
    ViewNotes,
    UpdateNote,
    DeleteNote,
    SetReminder,
}

/// Button layout of the main menu, one inner slice per row
pub const MENU_LAYOUT: &[&[MenuAction]] = &[
    &[MenuAction::CreateNote, MenuAction::ViewNotes],
    &[MenuAction::UpdateNote, MenuAction::DeleteNote],
    &[MenuAction::SetReminder],
];

impl MenuAction {
    /// Slash command names
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "start" => Some(MenuAction::Start),
            "create" => Some(MenuAction::CreateNote),
            "view" => Some(MenuAction::ViewNotes),
            "update" => Some(MenuAction::UpdateNote),
            "delete" => Some(MenuAction::DeleteNote),
            "remind" => Some(MenuAction::SetReminder),
            _ => None,
        }
    }

    /// Button custom ids
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "create_note" => Some(MenuAction::CreateNote),
            "view_notes" => Some(MenuAction::ViewNotes),
            "update_note" => Some(MenuAction::UpdateNote),
            "delete_note" => Some(MenuAction::DeleteNote),
            "set_reminder" => Some(MenuAction::SetReminder),
            _ => None,
        }
    }

    /// Menu labels typed as plain text
    pub fn from_label(text: &str) -> Option<Self> {
        match text.trim() {
            "Create Note" => Some(MenuAction::CreateNote),
            "View Notes" => Some(MenuAction::ViewNotes),
            "Update Note" => Some(MenuAction::UpdateNote),
            "Delete Note" => Some(MenuAction::DeleteNote),
            "Set Reminder" => Some(MenuAction::SetReminder),
            _ => None,
        }
    }

    /// Slash command that opens this action
    pub fn command_name(&self) -> &'static str {
        match self {
            MenuAction::Start => "start",
            MenuAction::CreateNote => "create",
            MenuAction::ViewNotes => "view",
            MenuAction::UpdateNote => "update",
            MenuAction::DeleteNote => "delete",
            MenuAction::SetReminder => "remind",
        }
    }

    pub fn button_id(&self) -> &'static str {
        match self {
            MenuAction::Start => "start",
            MenuAction::CreateNote => "create_note",
            MenuAction::ViewNotes => "view_notes",
            MenuAction::UpdateNote => "update_note",
            MenuAction::DeleteNote => "delete_note",
            MenuAction::SetReminder => "set_reminder",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Start => "Start",
            MenuAction::CreateNote => "Create Note",
            MenuAction::ViewNotes => "View Notes",
            MenuAction::UpdateNote => "Update Note",
            MenuAction::DeleteNote => "Delete Note",
            MenuAction::SetReminder => "Set Reminder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Text(String),
    Action(MenuAction),
}

/// The person behind an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: String,
    pub display_name: String,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// One outbound message produced by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Attach the main menu buttons
    pub show_menu: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: false,
        }
    }

    pub fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_round_trip_through_ids_and_labels() {
        for action in MENU_LAYOUT.iter().flat_map(|row| row.iter()) {
            assert_eq!(MenuAction::from_button_id(action.button_id()), Some(*action));
            assert_eq!(MenuAction::from_label(action.label()), Some(*action));
        }
    }

    #[test]
    fn test_command_names_round_trip() {
        for action in MENU_LAYOUT.iter().flat_map(|row| row.iter()) {
            assert_eq!(MenuAction::from_command(action.command_name()), Some(*action));
        }
        assert_eq!(MenuAction::from_command(MenuAction::Start.command_name()), Some(MenuAction::Start));
    }

    #[test]
    fn test_commands() {
        assert_eq!(MenuAction::from_command("start"), Some(MenuAction::Start));
        assert_eq!(MenuAction::from_command("remind"), Some(MenuAction::SetReminder));
        assert_eq!(MenuAction::from_command("view"), Some(MenuAction::ViewNotes));
        assert_eq!(MenuAction::from_command("create_note"), None);
    }

    #[test]
    fn test_start_is_not_a_button_or_label() {
        assert_eq!(MenuAction::from_button_id("start"), None);
        assert_eq!(MenuAction::from_label("Start"), None);
        assert_eq!(MenuAction::from_label("create note"), None);
    }

    #[test]
    fn test_menu_has_five_buttons() {
        let count: usize = MENU_LAYOUT.iter().map(|row| row.len()).sum();
        assert_eq!(count, 5);
    }
}
