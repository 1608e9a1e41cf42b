//! # SQLite persistence
//!
//! Users and their notes. A single connection sits behind an async mutex;
//! every public method holds the lock for its whole read/write sequence.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Partial note updates through `NoteUpdate`, `count_notes`
//! - 1.0.0: Users and notes tables

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use log::{debug, info};
use sqlite::{Connection, State, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::datetime::{self, from_storage, to_storage};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        user_id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS notes (
        note_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL CHECK (length(title) > 0),
        content TEXT NOT NULL,
        scheduled_at TEXT NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_notes_user_scheduled ON notes(user_id, scheduled_at);
";

const NOTE_COLUMNS: &str = "note_id, title, content, scheduled_at, user_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub note_id: i64,
    pub title: String,
    pub content: String,
    /// Display date, also the cut-off for "active" notes
    pub scheduled_at: NaiveDateTime,
    pub user_id: String,
}

/// Fields to overwrite on an existing note; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub scheduled_at: Option<NaiveDateTime>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn scheduled_at(scheduled_at: NaiveDateTime) -> Self {
        Self {
            scheduled_at: Some(scheduled_at),
            ..Self::default()
        }
    }

    fn assignments(&self) -> Vec<(&'static str, String)> {
        let mut assignments = Vec::new();
        if let Some(title) = &self.title {
            assignments.push(("title = ?", title.clone()));
        }
        if let Some(content) = &self.content {
            assignments.push(("content = ?", content.clone()));
        }
        if let Some(scheduled_at) = &self.scheduled_at {
            assignments.push(("scheduled_at = ?", to_storage(scheduled_at)));
        }
        assignments
    }
}

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `database_path` and apply the schema.
    ///
    /// `":memory:"` gives a private in-memory database.
    pub async fn new(database_path: &str) -> Result<Self> {
        let connection = sqlite::open(database_path)
            .map_err(|e| anyhow!("Failed to open database at {database_path}: {e}"))?;

        let database = Database {
            connection: Arc::new(Mutex::new(connection)),
        };
        database.migrate().await?;

        info!("📦 Database ready at {database_path}");
        Ok(database)
    }

    async fn migrate(&self) -> Result<()> {
        let conn = self.connection.lock().await;
        conn.execute("PRAGMA foreign_keys = ON;")?;
        conn.execute(SCHEMA)?;
        debug!("Database schema applied");
        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let conn = self.connection.lock().await;
        let mut statement = conn.prepare("SELECT user_id, username FROM users WHERE user_id = ?")?;
        statement.bind((1, user_id))?;

        if let State::Row = statement.next()? {
            return Ok(Some(User {
                user_id: statement.read::<String, _>("user_id")?,
                username: statement.read::<String, _>("username")?,
            }));
        }
        Ok(None)
    }

    /// Insert a user; an existing row with the same id is left as is
    pub async fn create_user(&self, user_id: &str, username: &str) -> Result<()> {
        let conn = self.connection.lock().await;
        let mut statement =
            conn.prepare("INSERT OR IGNORE INTO users (user_id, username) VALUES (?, ?)")?;
        statement.bind((1, user_id))?;
        statement.bind((2, username))?;
        statement.next()?;
        Ok(())
    }

    /// Insert a note and return its id. `scheduled_at` defaults to now.
    pub async fn create_note(
        &self,
        user_id: &str,
        title: &str,
        content: &str,
        scheduled_at: Option<NaiveDateTime>,
    ) -> Result<i64> {
        let scheduled_at = to_storage(&scheduled_at.unwrap_or_else(datetime::now));

        let conn = self.connection.lock().await;
        let mut insert = conn.prepare(
            "INSERT INTO notes (title, content, scheduled_at, user_id) VALUES (?, ?, ?, ?)",
        )?;
        insert.bind((1, title))?;
        insert.bind((2, content))?;
        insert.bind((3, scheduled_at.as_str()))?;
        insert.bind((4, user_id))?;
        insert.next()?;

        let mut last_id = conn.prepare("SELECT last_insert_rowid()")?;
        last_id.next()?;
        let note_id = last_id.read::<i64, _>(0)?;

        debug!("Created note {note_id} for user {user_id}");
        Ok(note_id)
    }

    /// Look up a note owned by `user_id`; other users' notes are `None`
    pub async fn get_note(&self, note_id: i64, user_id: &str) -> Result<Option<Note>> {
        let conn = self.connection.lock().await;
        Self::select_owned_note(&conn, note_id, user_id)
    }

    /// Apply `update` to a note owned by `user_id`. Returns false if no such note exists.
    pub async fn update_note(&self, note_id: i64, user_id: &str, update: &NoteUpdate) -> Result<bool> {
        let conn = self.connection.lock().await;
        if Self::select_owned_note(&conn, note_id, user_id)?.is_none() {
            return Ok(false);
        }

        let assignments = update.assignments();
        if assignments.is_empty() {
            return Ok(true);
        }

        let sql = format!(
            "UPDATE notes SET {} WHERE note_id = ? AND user_id = ?",
            assignments
                .iter()
                .map(|(clause, _)| *clause)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let mut statement = conn.prepare(sql)?;
        for (index, (_, value)) in assignments.iter().enumerate() {
            statement.bind((index + 1, value.as_str()))?;
        }
        statement.bind((assignments.len() + 1, note_id))?;
        statement.bind((assignments.len() + 2, user_id))?;
        statement.next()?;

        debug!("Updated note {note_id} for user {user_id}");
        Ok(true)
    }

    /// Delete a note owned by `user_id`. Returns false if no such note exists.
    pub async fn delete_note(&self, note_id: i64, user_id: &str) -> Result<bool> {
        let conn = self.connection.lock().await;
        if Self::select_owned_note(&conn, note_id, user_id)?.is_none() {
            return Ok(false);
        }

        let mut statement = conn.prepare("DELETE FROM notes WHERE note_id = ? AND user_id = ?")?;
        statement.bind((1, note_id))?;
        statement.bind((2, user_id))?;
        statement.next()?;

        debug!("Deleted note {note_id} for user {user_id}");
        Ok(true)
    }

    /// Notes scheduled at or after `now`, earliest first
    pub async fn list_active_notes(&self, user_id: &str, now: NaiveDateTime) -> Result<Vec<Note>> {
        let now = to_storage(&now);

        let conn = self.connection.lock().await;
        let mut statement = conn.prepare(format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE user_id = ? AND scheduled_at >= ?
             ORDER BY scheduled_at ASC, note_id ASC"
        ))?;
        statement.bind((1, user_id))?;
        statement.bind((2, now.as_str()))?;

        let mut notes = Vec::new();
        while let State::Row = statement.next()? {
            notes.push(Self::read_note(&statement)?);
        }
        Ok(notes)
    }

    /// Total notes owned by `user_id`, past ones included
    pub async fn count_notes(&self, user_id: &str) -> Result<i64> {
        let conn = self.connection.lock().await;
        let mut statement = conn.prepare("SELECT COUNT(*) FROM notes WHERE user_id = ?")?;
        statement.bind((1, user_id))?;
        statement.next()?;
        Ok(statement.read::<i64, _>(0)?)
    }

    fn select_owned_note(conn: &Connection, note_id: i64, user_id: &str) -> Result<Option<Note>> {
        let mut statement = conn.prepare(format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE note_id = ? AND user_id = ?"
        ))?;
        statement.bind((1, note_id))?;
        statement.bind((2, user_id))?;

        if let State::Row = statement.next()? {
            return Ok(Some(Self::read_note(&statement)?));
        }
        Ok(None)
    }

    fn read_note(statement: &Statement<'_>) -> Result<Note> {
        let note_id = statement.read::<i64, _>("note_id")?;
        let raw_scheduled_at = statement.read::<String, _>("scheduled_at")?;
        let scheduled_at = from_storage(&raw_scheduled_at).ok_or_else(|| {
            anyhow!("Note {note_id} has an unreadable scheduled_at: {raw_scheduled_at}")
        })?;

        Ok(Note {
            note_id,
            title: statement.read::<String, _>("title")?,
            content: statement.read::<String, _>("content")?,
            scheduled_at,
            user_id: statement.read::<String, _>("user_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::datetime::parse_note_datetime;

    async fn database_with_users() -> Database {
        let db = Database::new(":memory:").await.unwrap();
        db.create_user("alice", "Alice").await.unwrap();
        db.create_user("bob", "Bob").await.unwrap();
        db
    }

    fn at(input: &str) -> NaiveDateTime {
        parse_note_datetime(input).unwrap()
    }

    #[tokio::test]
    async fn test_create_user_is_idempotent() {
        let db = Database::new(":memory:").await.unwrap();
        assert!(db.get_user("alice").await.unwrap().is_none());

        db.create_user("alice", "Alice").await.unwrap();
        db.create_user("alice", "Renamed").await.unwrap();

        let user = db.get_user("alice").await.unwrap().unwrap();
        assert_eq!(user.username, "Alice");
    }

    #[tokio::test]
    async fn test_create_and_get_note() {
        let db = database_with_users().await;
        let id = db
            .create_note("alice", "Groceries", "Buy milk", Some(at("01.01.2030 10:00")))
            .await
            .unwrap();

        let note = db.get_note(id, "alice").await.unwrap().unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Buy milk");
        assert_eq!(note.scheduled_at, at("01.01.2030 10:00"));
        assert_eq!(note.user_id, "alice");
    }

    #[tokio::test]
    async fn test_note_defaults_to_creation_time() {
        let db = database_with_users().await;
        let before = datetime::now() - chrono::Duration::seconds(1);
        let id = db.create_note("alice", "Now", "", None).await.unwrap();

        let note = db.get_note(id, "alice").await.unwrap().unwrap();
        assert!(note.scheduled_at >= before);
        assert!(note.scheduled_at <= datetime::now());
    }

    #[tokio::test]
    async fn test_note_requires_existing_user() {
        let db = Database::new(":memory:").await.unwrap();
        assert!(db.create_note("ghost", "t", "c", None).await.is_err());
    }

    #[tokio::test]
    async fn test_other_users_notes_are_invisible() {
        let db = database_with_users().await;
        let id = db.create_note("bob", "Secret", "", None).await.unwrap();

        assert!(db.get_note(id, "alice").await.unwrap().is_none());
        assert!(!db.update_note(id, "alice", &NoteUpdate::title("Mine")).await.unwrap());
        assert!(!db.delete_note(id, "alice").await.unwrap());

        let note = db.get_note(id, "bob").await.unwrap().unwrap();
        assert_eq!(note.title, "Secret");
    }

    #[tokio::test]
    async fn test_update_touches_only_given_fields() {
        let db = database_with_users().await;
        let id = db
            .create_note("alice", "Groceries", "Buy milk", Some(at("01.01.2030 10:00")))
            .await
            .unwrap();

        assert!(db
            .update_note(id, "alice", &NoteUpdate::scheduled_at(at("02.02.2031 11:30")))
            .await
            .unwrap());
        assert!(db
            .update_note(id, "alice", &NoteUpdate::content("Buy oat milk"))
            .await
            .unwrap());

        let note = db.get_note(id, "alice").await.unwrap().unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Buy oat milk");
        assert_eq!(note.scheduled_at, at("02.02.2031 11:30"));
    }

    #[tokio::test]
    async fn test_update_missing_note() {
        let db = database_with_users().await;
        assert!(!db.update_note(42, "alice", &NoteUpdate::title("x")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_note() {
        let db = database_with_users().await;
        let id = db.create_note("alice", "Temp", "", None).await.unwrap();

        assert!(db.delete_note(id, "alice").await.unwrap());
        assert!(!db.delete_note(id, "alice").await.unwrap());
        assert!(db.get_note(id, "alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_active_notes_filters_and_orders() {
        let db = database_with_users().await;
        let late = db
            .create_note("alice", "Late", "", Some(at("05.05.2031 09:00")))
            .await
            .unwrap();
        let past = db
            .create_note("alice", "Past", "", Some(at("01.01.2020 09:00")))
            .await
            .unwrap();
        let early = db
            .create_note("alice", "Early", "", Some(at("01.01.2030 09:00")))
            .await
            .unwrap();
        let boundary = db
            .create_note("alice", "Boundary", "", Some(at("01.06.2026 12:00")))
            .await
            .unwrap();
        db.create_note("bob", "Bob's", "", Some(at("01.01.2030 09:00")))
            .await
            .unwrap();

        let notes = db
            .list_active_notes("alice", at("01.06.2026 12:00"))
            .await
            .unwrap();
        let ids: Vec<i64> = notes.iter().map(|n| n.note_id).collect();

        assert_eq!(ids, vec![boundary, early, late]);
        assert!(!ids.contains(&past));
        assert_eq!(db.count_notes("alice").await.unwrap(), 4);
        assert_eq!(db.count_notes("carol").await.unwrap(), 0);
    }
}
