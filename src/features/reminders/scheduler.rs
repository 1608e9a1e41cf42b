//! # Feature: Reminder Scheduler
//!
//! One-shot note reminders. Each call to [`ReminderScheduler::schedule`] spawns
//! a detached tokio task that sleeps until the fire time, re-reads the note and
//! delivers it through the [`Messenger`]. Jobs live only in memory and are lost
//! on restart; deleting a note does not cancel its job, the fire-time lookup
//! simply finds nothing.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Explicit `ScheduleOutcome` instead of a bare bool
//! - 1.0.0: Initial release

use anyhow::Result;
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::sync::Arc;

use crate::core::datetime::{self, format_note_datetime};
use crate::core::Messenger;
use crate::database::Database;

/// A registered reminder: who gets notified, about what, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderJob {
    pub user_id: String,
    pub note_id: i64,
    pub fire_at: NaiveDateTime,
}

/// Result of a scheduling request. Rejections are ordinary values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled(ReminderJob),
    /// The note does not exist or belongs to someone else
    NoteNotFound,
    /// The fire time is not strictly after now
    NotInFuture,
}

#[derive(Clone)]
pub struct ReminderScheduler {
    database: Database,
    messenger: Arc<dyn Messenger>,
}

impl ReminderScheduler {
    pub fn new(database: Database, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            database,
            messenger,
        }
    }

    /// Arm a reminder for `note_id` at `fire_at` (local wall-clock time)
    pub async fn schedule(
        &self,
        user_id: &str,
        note_id: i64,
        fire_at: NaiveDateTime,
    ) -> Result<ScheduleOutcome> {
        self.schedule_at(user_id, note_id, fire_at, datetime::now())
            .await
    }

    /// Same as [`schedule`](Self::schedule) with an explicit "now"
    pub async fn schedule_at(
        &self,
        user_id: &str,
        note_id: i64,
        fire_at: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<ScheduleOutcome> {
        if self.database.get_note(note_id, user_id).await?.is_none() {
            return Ok(ScheduleOutcome::NoteNotFound);
        }

        // Computed once; the job never re-checks the clock.
        let delay = match (fire_at - now).to_std() {
            Ok(delay) if !delay.is_zero() => delay,
            _ => return Ok(ScheduleOutcome::NotInFuture),
        };

        let job = ReminderJob {
            user_id: user_id.to_string(),
            note_id,
            fire_at,
        };

        let scheduler = self.clone();
        let spawned = job.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.fire(&spawned.user_id, spawned.note_id).await;
        });

        info!(
            "⏰ Reminder armed for user {} on note {} at {} (in {}s)",
            user_id,
            note_id,
            format_note_datetime(&fire_at),
            delay.as_secs()
        );
        Ok(ScheduleOutcome::Scheduled(job))
    }

    /// Deliver a due reminder. Never fails: problems are logged.
    pub async fn fire(&self, user_id: &str, note_id: i64) {
        let note = match self.database.get_note(note_id, user_id).await {
            Ok(Some(note)) => note,
            Ok(None) => {
                warn!("Reminder skipped: note {note_id} no longer exists for user {user_id}");
                return;
            }
            Err(e) => {
                error!("Reminder lookup failed for note {note_id} (user {user_id}): {e}");
                return;
            }
        };

        let text = format!(
            "⏰ Reminder about your note:\n\nTitle: {}\nContent: {}",
            note.title, note.content
        );
        match self.messenger.send(user_id, &text).await {
            Ok(()) => info!("Reminder delivered to user {user_id} for note {note_id}"),
            Err(e) => error!("Failed to deliver reminder for note {note_id} to user {user_id}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::messenger::testing::RecordingMessenger;
    use crate::database::NoteUpdate;
    use chrono::Duration;
    use tokio::time::sleep;

    async fn setup() -> (Database, Arc<RecordingMessenger>, ReminderScheduler) {
        let database = Database::new(":memory:").await.unwrap();
        database.create_user("alice", "Alice").await.unwrap();
        database.create_user("bob", "Bob").await.unwrap();
        let messenger = Arc::new(RecordingMessenger::default());
        let scheduler = ReminderScheduler::new(database.clone(), messenger.clone());
        (database, messenger, scheduler)
    }

    #[tokio::test]
    async fn test_rejects_missing_note() {
        let (_db, _messenger, scheduler) = setup().await;
        let now = datetime::now();

        let outcome = scheduler
            .schedule_at("alice", 99, now + Duration::minutes(5), now)
            .await
            .unwrap();
        assert_eq!(outcome, ScheduleOutcome::NoteNotFound);
    }

    #[tokio::test]
    async fn test_rejects_someone_elses_note() {
        let (db, _messenger, scheduler) = setup().await;
        let id = db.create_note("bob", "Bob's", "", None).await.unwrap();
        let now = datetime::now();

        let outcome = scheduler
            .schedule_at("alice", id, now + Duration::minutes(5), now)
            .await
            .unwrap();
        assert_eq!(outcome, ScheduleOutcome::NoteNotFound);
    }

    #[tokio::test]
    async fn test_now_is_rejected_and_one_second_later_accepted() {
        let (db, _messenger, scheduler) = setup().await;
        let id = db.create_note("alice", "Call", "", None).await.unwrap();
        let now = datetime::now();

        let at_now = scheduler.schedule_at("alice", id, now, now).await.unwrap();
        assert_eq!(at_now, ScheduleOutcome::NotInFuture);

        let in_past = scheduler
            .schedule_at("alice", id, now - Duration::seconds(1), now)
            .await
            .unwrap();
        assert_eq!(in_past, ScheduleOutcome::NotInFuture);

        let fire_at = now + Duration::seconds(1);
        let later = scheduler.schedule_at("alice", id, fire_at, now).await.unwrap();
        assert_eq!(
            later,
            ScheduleOutcome::Scheduled(ReminderJob {
                user_id: "alice".to_string(),
                note_id: id,
                fire_at,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_with_current_note_contents() {
        let (db, messenger, scheduler) = setup().await;
        let id = db.create_note("alice", "Groceries", "Buy milk", None).await.unwrap();
        let now = datetime::now();

        scheduler
            .schedule_at("alice", id, now + Duration::milliseconds(200), now)
            .await
            .unwrap();
        db.update_note(id, "alice", &NoteUpdate::title("Groceries!"))
            .await
            .unwrap();

        sleep(std::time::Duration::from_millis(600)).await;

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "alice");
        assert!(sent[0].1.contains("Title: Groceries!"));
        assert!(sent[0].1.contains("Content: Buy milk"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleted_note_is_skipped_silently() {
        let (db, messenger, scheduler) = setup().await;
        let id = db.create_note("alice", "Temp", "", None).await.unwrap();
        let now = datetime::now();

        scheduler
            .schedule_at("alice", id, now + Duration::milliseconds(200), now)
            .await
            .unwrap();
        db.delete_note(id, "alice").await.unwrap();

        sleep(std::time::Duration::from_millis(600)).await;
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_call_creates_an_independent_job() {
        let (db, messenger, scheduler) = setup().await;
        let id = db.create_note("alice", "Twice", "", None).await.unwrap();
        let now = datetime::now();

        for _ in 0..2 {
            let outcome = scheduler
                .schedule_at("alice", id, now + Duration::milliseconds(150), now)
                .await
                .unwrap();
            assert!(matches!(outcome, ScheduleOutcome::Scheduled(_)));
        }

        sleep(std::time::Duration::from_millis(600)).await;
        assert_eq!(messenger.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_fire_reads_note_directly() {
        let (db, messenger, scheduler) = setup().await;
        let id = db.create_note("bob", "Standup", "10 minutes", None).await.unwrap();

        scheduler.fire("bob", id).await;
        scheduler.fire("alice", id).await;

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "bob");
    }
}
