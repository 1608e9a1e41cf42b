//! # Reminders Feature
//!
//! One-shot, in-memory note reminders delivered by direct message.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod scheduler;

pub use scheduler::{ReminderJob, ReminderScheduler, ScheduleOutcome};
