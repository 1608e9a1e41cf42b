//! Wall-clock helpers for the `DD.MM.YYYY HH:MM` wire format
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Format users type and see, e.g. `31.12.2025 23:59`
pub const NOTE_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Human-readable form of [`NOTE_DATETIME_FORMAT`] for prompts
pub const NOTE_DATETIME_HINT: &str = "DD.MM.YYYY HH:MM";

/// Format used for the `scheduled_at` column
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn datetime_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{2}\.\d{2}\.\d{4} \d{2}:\d{2}$").expect("datetime shape regex is valid")
    })
}

/// Parse user input strictly: zero-padded fields, single space, 24-hour clock.
///
/// Returns `None` for anything chrono would accept loosely (e.g. `1.1.2030 9:00`).
pub fn parse_note_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if !datetime_shape().is_match(input) {
        return None;
    }
    NaiveDateTime::parse_from_str(input, NOTE_DATETIME_FORMAT).ok()
}

pub fn format_note_datetime(value: &NaiveDateTime) -> String {
    value.format(NOTE_DATETIME_FORMAT).to_string()
}

pub fn to_storage(value: &NaiveDateTime) -> String {
    value.format(STORAGE_DATETIME_FORMAT).to_string()
}

pub fn from_storage(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORAGE_DATETIME_FORMAT).ok()
}

/// Current local wall-clock time, the reference for "active" notes and reminders
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
