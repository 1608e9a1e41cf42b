//! # Feature: Note Wizard
//!
//! Drives the create / update / delete / set-reminder dialogues. Every event
//! is routed by the user's current [`WizardStage`]; bad input re-prompts the
//! same stage, finishing a dialogue returns the user to idle.
//!
//! - **Version**: 1.3.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Events of one user are handled one at a time
//! - 1.2.0: Reminder id lookups that miss now end the dialogue
//! - 1.1.0: Title validation, idle menu labels
//! - 1.0.0: Initial release

use anyhow::Result;
use log::{debug, info};

use super::events::{ChatEvent, ChatUser, MenuAction, Reply};
use super::state::{ConversationStore, StagedNote, WizardStage};
use crate::core::datetime::{self, format_note_datetime, parse_note_datetime, NOTE_DATETIME_HINT};
use crate::core::response::chunk_for_message;
use crate::database::{Database, Note, NoteUpdate};
use crate::features::notes::{format_note_listing, validate_title, NoteField, TitleError, MAX_TITLE_LENGTH};
use crate::features::reminders::{ReminderScheduler, ScheduleOutcome};

const NOT_FOUND: &str = "Note with this ID was not found.";
const NOT_FOUND_RETRY: &str = "Note with this ID was not found. Try again.";
const ID_NOT_A_NUMBER: &str = "ID must be a number. Try again.";
const FIELD_PROMPT: &str = "What do you want to update? Enter one of: title, content, date.";
const FIELD_INVALID: &str = "Invalid choice. Enter one of: title, content, date.";
const UNKNOWN_TEXT: &str = "I don't understand. Choose an action from the menu or use a command.";

fn invalid_date() -> String {
    format!("Invalid date format. Use {NOTE_DATETIME_HINT}.")
}

fn title_error(error: TitleError) -> String {
    match error {
        TitleError::Empty => "The title cannot be empty. Enter the note title.".to_string(),
        TitleError::TooLong => {
            format!("The title is too long (max {MAX_TITLE_LENGTH} characters). Try again.")
        }
    }
}

fn parse_note_id(input: &str) -> Option<i64> {
    input.parse::<i64>().ok()
}

fn staged(note: &Note) -> StagedNote {
    StagedNote {
        note_id: note.note_id,
        title: note.title.clone(),
    }
}

#[derive(Clone)]
pub struct NoteWizard {
    database: Database,
    conversations: ConversationStore,
    scheduler: ReminderScheduler,
}

impl NoteWizard {
    pub fn new(database: Database, conversations: ConversationStore, scheduler: ReminderScheduler) -> Self {
        Self {
            database,
            conversations,
            scheduler,
        }
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Process one event for `user` and return the messages to send back
    pub async fn handle(&self, user: &ChatUser, event: ChatEvent) -> Result<Vec<Reply>> {
        // Two quick messages must not both finish the same stage
        let _turn = self.conversations.lock_user(&user.id).await;
        self.ensure_user(user).await?;

        let replies = match event {
            ChatEvent::Action(action) => self.begin(user, action).await?,
            ChatEvent::Text(text) => match self.conversations.get(&user.id) {
                Some(stage) => self.advance(user, stage, text.trim()).await?,
                None => self.handle_idle_text(user, text.trim()).await?,
            },
        };

        Ok(split_long_replies(replies))
    }

    async fn ensure_user(&self, user: &ChatUser) -> Result<()> {
        if self.database.get_user(&user.id).await?.is_none() {
            self.database.create_user(&user.id, &user.display_name).await?;
            info!("👤 Registered new user {} ({})", user.id, user.display_name);
        }
        Ok(())
    }

    async fn begin(&self, user: &ChatUser, action: MenuAction) -> Result<Vec<Reply>> {
        let replies = match action {
            MenuAction::Start => vec![Reply::with_menu(format!(
                "Hello, {}! Choose an action:",
                user.display_name
            ))],
            MenuAction::ViewNotes => self.view_notes(user).await?,
            MenuAction::CreateNote => self.enter(user, WizardStage::AwaitingTitle, "Enter the note title."),
            MenuAction::UpdateNote => self.enter(
                user,
                WizardStage::AwaitingUpdateId,
                "Enter the ID of the note you want to update.",
            ),
            MenuAction::DeleteNote => self.enter(
                user,
                WizardStage::AwaitingDeleteId,
                "Enter the ID of the note you want to delete.",
            ),
            MenuAction::SetReminder => self.enter(
                user,
                WizardStage::AwaitingReminderId,
                "Enter the ID of the note you want to be reminded about.",
            ),
        };
        Ok(replies)
    }

    async fn handle_idle_text(&self, user: &ChatUser, text: &str) -> Result<Vec<Reply>> {
        match MenuAction::from_label(text) {
            Some(action) => self.begin(user, action).await,
            None => Ok(vec![Reply::with_menu(UNKNOWN_TEXT)]),
        }
    }

    async fn view_notes(&self, user: &ChatUser) -> Result<Vec<Reply>> {
        let notes = self.database.list_active_notes(&user.id, datetime::now()).await?;
        if !notes.is_empty() {
            debug!("Listing {} active notes for user {}", notes.len(), user.id);
            return Ok(vec![Reply::text(format_note_listing(&notes))]);
        }

        let text = if self.database.count_notes(&user.id).await? == 0 {
            "You have no notes."
        } else {
            "You have no upcoming notes."
        };
        Ok(vec![Reply::text(text)])
    }

    async fn advance(&self, user: &ChatUser, stage: WizardStage, input: &str) -> Result<Vec<Reply>> {
        debug!("User {} in stage {} sent {} chars", user.id, stage.name(), input.len());

        match stage {
            WizardStage::AwaitingTitle => Ok(match validate_title(input) {
                Ok(title) => self.next(user, WizardStage::AwaitingContent { title }, "Enter the note content."),
                Err(e) => vec![Reply::text(title_error(e))],
            }),

            WizardStage::AwaitingContent { title } => Ok(self.next(
                user,
                WizardStage::AwaitingDate {
                    title,
                    content: input.to_string(),
                },
                &format!("Enter the note date and time in {NOTE_DATETIME_HINT} format."),
            )),

            WizardStage::AwaitingDate { title, content } => {
                let Some(when) = parse_note_datetime(input) else {
                    return Ok(vec![Reply::text(invalid_date())]);
                };
                let note_id = self
                    .database
                    .create_note(&user.id, &title, &content, Some(when))
                    .await?;
                self.finish(user);
                info!("📝 User {} created note {}", user.id, note_id);

                Ok(vec![Reply::with_menu(format!(
                    "Note created!\nID: {note_id}\nTitle: {title}\nContent: {content}\nDate: {}",
                    format_note_datetime(&when)
                ))])
            }

            WizardStage::AwaitingUpdateId => {
                let Some(note_id) = parse_note_id(input) else {
                    return Ok(vec![Reply::text(ID_NOT_A_NUMBER)]);
                };
                Ok(match self.database.get_note(note_id, &user.id).await? {
                    Some(note) => self.next(
                        user,
                        WizardStage::AwaitingUpdateField { note: staged(&note) },
                        FIELD_PROMPT,
                    ),
                    None => vec![Reply::text(NOT_FOUND_RETRY)],
                })
            }

            WizardStage::AwaitingUpdateField { note } => Ok(match NoteField::parse(input) {
                Some(field @ NoteField::Title) => self.next(
                    user,
                    WizardStage::AwaitingNewTitle { note },
                    &format!("Enter the new {field}."),
                ),
                Some(field @ NoteField::Content) => self.next(
                    user,
                    WizardStage::AwaitingNewContent { note },
                    &format!("Enter the new {field}."),
                ),
                Some(NoteField::Date) => self.next(
                    user,
                    WizardStage::AwaitingNewDate { note },
                    &format!("Enter the new date and time in {NOTE_DATETIME_HINT} format."),
                ),
                None => vec![Reply::text(FIELD_INVALID)],
            }),

            WizardStage::AwaitingNewTitle { note } => match validate_title(input) {
                Ok(title) => {
                    let done = format!("Note title updated to '{title}'.");
                    self.apply_update(user, &note, NoteUpdate::title(title), done).await
                }
                Err(e) => Ok(vec![Reply::text(title_error(e))]),
            },

            WizardStage::AwaitingNewContent { note } => {
                self.apply_update(
                    user,
                    &note,
                    NoteUpdate::content(input),
                    "Note content updated.".to_string(),
                )
                .await
            }

            WizardStage::AwaitingNewDate { note } => {
                let Some(when) = parse_note_datetime(input) else {
                    return Ok(vec![Reply::text(invalid_date())]);
                };
                let done = format!("Note date and time updated to {}.", format_note_datetime(&when));
                self.apply_update(user, &note, NoteUpdate::scheduled_at(when), done).await
            }

            WizardStage::AwaitingDeleteId => {
                let Some(note_id) = parse_note_id(input) else {
                    return Ok(vec![Reply::text(ID_NOT_A_NUMBER)]);
                };
                let deleted = self.database.delete_note(note_id, &user.id).await?;
                self.finish(user);

                if deleted {
                    info!("🗑️ User {} deleted note {}", user.id, note_id);
                    Ok(vec![Reply::with_menu(format!("Note with ID {note_id} deleted."))])
                } else {
                    Ok(vec![Reply::with_menu(NOT_FOUND)])
                }
            }

            WizardStage::AwaitingReminderId => {
                let Some(note_id) = parse_note_id(input) else {
                    return Ok(vec![Reply::text(ID_NOT_A_NUMBER)]);
                };
                match self.database.get_note(note_id, &user.id).await? {
                    Some(note) => Ok(self.next(
                        user,
                        WizardStage::AwaitingReminderTime { note: staged(&note) },
                        &format!("Enter the reminder time in {NOTE_DATETIME_HINT} format."),
                    )),
                    None => {
                        self.finish(user);
                        Ok(vec![Reply::with_menu(NOT_FOUND)])
                    }
                }
            }

            WizardStage::AwaitingReminderTime { note } => {
                let Some(when) = parse_note_datetime(input) else {
                    return Ok(vec![Reply::text(invalid_date())]);
                };
                if when <= datetime::now() {
                    return Ok(vec![Reply::text(
                        "Reminder time must be in the future. Try again.",
                    )]);
                }

                match self.scheduler.schedule(&user.id, note.note_id, when).await? {
                    ScheduleOutcome::Scheduled(_) => {
                        self.finish(user);
                        Ok(vec![Reply::with_menu(format!(
                            "Reminder for note '{}' set for {}.",
                            note.title,
                            format_note_datetime(&when)
                        ))])
                    }
                    ScheduleOutcome::NoteNotFound => {
                        self.finish(user);
                        Ok(vec![Reply::with_menu(NOT_FOUND)])
                    }
                    ScheduleOutcome::NotInFuture => Ok(vec![Reply::text(
                        "Reminder time must be in the future. Try again.",
                    )]),
                }
            }
        }
    }

    async fn apply_update(
        &self,
        user: &ChatUser,
        note: &StagedNote,
        update: NoteUpdate,
        done: String,
    ) -> Result<Vec<Reply>> {
        let updated = self.database.update_note(note.note_id, &user.id, &update).await?;
        self.finish(user);

        if updated {
            info!("✏️ User {} updated note {}", user.id, note.note_id);
            Ok(vec![Reply::with_menu(done)])
        } else {
            Ok(vec![Reply::with_menu(NOT_FOUND)])
        }
    }

    /// Start a dialogue, discarding any unfinished one
    fn enter(&self, user: &ChatUser, stage: WizardStage, prompt: &str) -> Vec<Reply> {
        let name = stage.name();
        if let Some(previous) = self.conversations.set(&user.id, stage) {
            debug!("User {} abandoned {} for {}", user.id, previous.name(), name);
        }
        vec![Reply::text(prompt)]
    }

    fn next(&self, user: &ChatUser, stage: WizardStage, prompt: &str) -> Vec<Reply> {
        debug!("User {} -> {}", user.id, stage.name());
        self.conversations.set(&user.id, stage);
        vec![Reply::text(prompt)]
    }

    fn finish(&self, user: &ChatUser) {
        self.conversations.clear(&user.id);
        debug!("User {} -> idle", user.id);
    }
}

/// Split replies that exceed the message limit; the menu stays on the last piece
fn split_long_replies(replies: Vec<Reply>) -> Vec<Reply> {
    let mut out = Vec::with_capacity(replies.len());
    for reply in replies {
        let chunks = chunk_for_message(&reply.text);
        let last = chunks.len().saturating_sub(1);
        for (index, text) in chunks.into_iter().enumerate() {
            out.push(Reply {
                text,
                show_menu: reply.show_menu && index == last,
            });
        }
    }
    out
}
