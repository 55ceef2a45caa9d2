//! Line formats for the persisted reminder file.
//!
//! A codec maps one reminder to one line and back. Decoding returns `None`
//! for anything it cannot read; the store skips such lines.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};

use super::reminder::{Priority, Reminder};

pub const FIELD_DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 5;
/// Short date / short time, e.g. `10/17/2026 9:00 AM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y %-I:%M %p";

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("time format `{0}` could not render a due time")]
    Time(String),
    #[error("failed to serialize reminder: {0}")]
    Json(#[from] serde_json::Error),
}

/// A time format the pipe codec cannot use without losing records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeFormatError {
    #[error("time format `{0}` is not a valid strftime pattern")]
    Invalid(String),
    #[error("time format `{0}` produces a delimiter or line break")]
    BreaksLine(String),
    #[error("time format `{0}` cannot be read back to the same date and minute")]
    NotReversible(String),
}

pub trait RecordCodec {
    fn encode(&self, reminder: &Reminder) -> Result<String, EncodeError>;
    fn decode(&self, line: &str) -> Option<Reminder>;
}

/// `title|description|time|priority|category`, no escaping.
#[derive(Debug, Clone)]
pub struct PipeCodec {
    time_format: String,
}

impl Default for PipeCodec {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl PipeCodec {
    /// Accepts `time_format` only if a due time written with it reads back
    /// unchanged and stays inside one field.
    pub fn new(time_format: impl Into<String>) -> Result<Self, TimeFormatError> {
        let time_format = time_format.into();
        check_time_format(&time_format)?;
        Ok(Self { time_format })
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    fn format_time(&self, time: NaiveDateTime) -> Result<String, EncodeError> {
        let mut text = String::new();
        write!(text, "{}", time.format(&self.time_format))
            .map_err(|_| EncodeError::Time(self.time_format.clone()))?;
        Ok(text)
    }
}

fn check_time_format(format: &str) -> Result<(), TimeFormatError> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(TimeFormatError::Invalid(format.to_string()));
    }

    // Day above 12 and an afternoon hour catch swapped or 12-hour-only fields.
    let sample = NaiveDate::from_ymd_opt(2031, 12, 28)
        .and_then(|d| d.and_hms_opt(21, 47, 0))
        .ok_or_else(|| TimeFormatError::Invalid(format.to_string()))?;
    let mut text = String::new();
    write!(text, "{}", sample.format_with_items(items.iter()))
        .map_err(|_| TimeFormatError::Invalid(format.to_string()))?;

    if text.contains([FIELD_DELIMITER, '\r', '\n']) {
        return Err(TimeFormatError::BreaksLine(format.to_string()));
    }
    match NaiveDateTime::parse_from_str(text.trim(), format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(TimeFormatError::NotReversible(format.to_string())),
    }
}

impl RecordCodec for PipeCodec {
    fn encode(&self, reminder: &Reminder) -> Result<String, EncodeError> {
        let time = self.format_time(reminder.time)?;
        Ok([
            reminder.title.as_str(),
            reminder.description.as_str(),
            time.as_str(),
            reminder.priority.label(),
            reminder.category.as_str(),
        ]
        .map(flatten_field)
        .join("|"))
    }

    fn decode(&self, line: &str) -> Option<Reminder> {
        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let [title, description, time, priority, category] = parts.as_slice() else {
            return None;
        };

        let time = NaiveDateTime::parse_from_str(time.trim(), &self.time_format).ok()?;
        let priority = priority.trim().parse::<Priority>().ok()?;
        let reminder = Reminder::new(*title, *description, time, priority, *category);
        reminder.is_complete().then_some(reminder)
    }
}

// A field must never add a delimiter or end the line early.
fn flatten_field(field: &str) -> String {
    field
        .chars()
        .map(|c| match c {
            FIELD_DELIMITER => '/',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect()
}

/// One JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesCodec;

impl RecordCodec for JsonLinesCodec {
    fn encode(&self, reminder: &Reminder) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(reminder)?)
    }

    fn decode(&self, line: &str) -> Option<Reminder> {
        serde_json::from_str::<Reminder>(line)
            .ok()
            .map(Reminder::at_minute_precision)
            .filter(Reminder::is_complete)
    }
}
