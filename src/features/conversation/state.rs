//! Per-user wizard state
//!
//! A user with no entry in the store is idle. Each stage carries the fields
//! collected so far, so leaving a wizard (removing the entry) drops them too.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Per-user turn lock so one user's events are handled one at a time
//! - 1.0.0: Initial release

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// The note a wizard is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedNote {
    pub note_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStage {
    AwaitingTitle,
    AwaitingContent { title: String },
    AwaitingDate { title: String, content: String },
    AwaitingUpdateId,
    AwaitingUpdateField { note: StagedNote },
    AwaitingNewTitle { note: StagedNote },
    AwaitingNewContent { note: StagedNote },
    AwaitingNewDate { note: StagedNote },
    AwaitingDeleteId,
    AwaitingReminderId,
    AwaitingReminderTime { note: StagedNote },
}

impl WizardStage {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            WizardStage::AwaitingTitle => "waiting_note_title",
            WizardStage::AwaitingContent { .. } => "waiting_note_content",
            WizardStage::AwaitingDate { .. } => "waiting_note_date",
            WizardStage::AwaitingUpdateId => "waiting_note_id",
            WizardStage::AwaitingUpdateField { .. } => "waiting_update_field",
            WizardStage::AwaitingNewTitle { .. } => "waiting_new_title",
            WizardStage::AwaitingNewContent { .. } => "waiting_new_content",
            WizardStage::AwaitingNewDate { .. } => "waiting_new_date",
            WizardStage::AwaitingDeleteId => "waiting_note_id_for_delete",
            WizardStage::AwaitingReminderId => "waiting_note_id_for_reminder",
            WizardStage::AwaitingReminderTime { .. } => "waiting_remind_time",
        }
    }
}

/// Concurrent map of user id to current wizard stage
#[derive(Clone, Default)]
pub struct ConversationStore {
    stages: Arc<DashMap<String, WizardStage>>,
    turns: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other event of `user_id` is in flight.
    ///
    /// Hold the guard from reading the stage until the stage is updated.
    pub async fn lock_user(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let turn = self.turns.entry(user_id.to_string()).or_default().clone();
        turn.lock_owned().await
    }

    /// Current stage, `None` when idle
    pub fn get(&self, user_id: &str) -> Option<WizardStage> {
        self.stages.get(user_id).map(|stage| stage.clone())
    }

    /// Replace whatever the user was doing; returns the discarded stage
    pub fn set(&self, user_id: &str, stage: WizardStage) -> Option<WizardStage> {
        self.stages.insert(user_id.to_string(), stage)
    }

    /// Return the user to idle; returns true if a wizard was active
    pub fn clear(&self, user_id: &str) -> bool {
        self.stages.remove(user_id).is_some()
    }

    pub fn is_idle(&self, user_id: &str) -> bool {
        !self.stages.contains_key(user_id)
    }

    /// Number of users in the middle of a wizard
    pub fn active_count(&self) -> usize {
        self.stages.len()
    }
}
