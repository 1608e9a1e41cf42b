//! # Notes Feature
//!
//! Note fields, title validation and the text layout used when notes are listed.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::core::datetime::format_note_datetime;
use crate::database::Note;

/// Longest accepted note title, in characters
pub const MAX_TITLE_LENGTH: usize = 255;

/// Editable note fields, as typed during the update wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
    Date,
}

impl NoteField {
    /// Parse `title`, `content` or `date`, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "title" => Some(NoteField::Title),
            "content" => Some(NoteField::Content),
            "date" => Some(NoteField::Date),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteField::Title => "title",
            NoteField::Content => "content",
            NoteField::Date => "date",
        }
    }
}

impl std::fmt::Display for NoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a title was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleError {
    Empty,
    TooLong,
}

/// Trim and check a title
pub fn validate_title(input: &str) -> Result<String, TitleError> {
    let title = input.trim();
    if title.is_empty() {
        Err(TitleError::Empty)
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        Err(TitleError::TooLong)
    } else {
        Ok(title.to_string())
    }
}

pub fn format_note_entry(note: &Note) -> String {
    format!(
        "ID: {}\nTitle: {}\nContent: {}\nDate: {}",
        note.note_id,
        note.title,
        note.content,
        format_note_datetime(&note.scheduled_at)
    )
}

/// All entries, separated by a blank line
pub fn format_note_listing(notes: &[Note]) -> String {
    notes
        .iter()
        .map(format_note_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::datetime::parse_note_datetime;

    fn note(id: i64, title: &str, date: &str) -> Note {
        Note {
            note_id: id,
            title: title.to_string(),
            content: format!("{title} content"),
            scheduled_at: parse_note_datetime(date).unwrap(),
            user_id: "alice".to_string(),
        }
    }

    #[test]
    fn test_note_field_parse() {
        assert_eq!(NoteField::parse("title"), Some(NoteField::Title));
        assert_eq!(NoteField::parse(" Content "), Some(NoteField::Content));
        assert_eq!(NoteField::parse("DATE"), Some(NoteField::Date));
        assert_eq!(NoteField::parse("owner"), None);
        assert_eq!(NoteField::parse(""), None);
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Groceries "), Ok("Groceries".to_string()));
        assert_eq!(validate_title("   "), Err(TitleError::Empty));
        assert_eq!(validate_title(&"я".repeat(MAX_TITLE_LENGTH)).map(|t| t.chars().count()), Ok(MAX_TITLE_LENGTH));
        assert_eq!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)), Err(TitleError::TooLong));
    }

    #[test]
    fn test_format_note_entry() {
        let entry = format_note_entry(&note(3, "Groceries", "01.01.2030 10:00"));
        assert_eq!(
            entry,
            "ID: 3\nTitle: Groceries\nContent: Groceries content\nDate: 01.01.2030 10:00"
        );
    }

    #[test]
    fn test_format_note_listing_separates_entries() {
        let listing = format_note_listing(&[
            note(1, "A", "01.01.2030 10:00"),
            note(2, "B", "02.01.2030 10:00"),
        ]);
        assert_eq!(listing.matches("ID: ").count(), 2);
        assert!(listing.contains("10:00\n\nID: 2"));
    }
}
