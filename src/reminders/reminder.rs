use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Handle naming one reminder instance held by a store.
///
/// Ids are assigned when a record enters the collection and are never
/// persisted, so two reminders with identical fields stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderId(pub(crate) u64);

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort key: lower ranks are listed first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority `{0}`")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub title: String,
    pub description: String,
    pub time: NaiveDateTime,
    pub priority: Priority,
    pub category: String,
}

impl Reminder {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        time: NaiveDateTime,
        priority: Priority,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            time: truncate_to_minute(time),
            priority,
            category: category.into(),
        }
    }

    /// Drops seconds and below; the persisted time text only keeps minutes.
    pub fn at_minute_precision(mut self) -> Self {
        self.time = truncate_to_minute(self.time);
        self
    }

    /// True when every text field holds something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.time < now
    }

    pub fn time_display(&self) -> String {
        self.time.format("%a %b %d, %H:%M").to_string()
    }
}

fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
