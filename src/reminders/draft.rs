use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::reminder::{Priority, Reminder};

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const TIME_INPUT_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingField,
    #[error("Could not read date `{date}` and time `{time}` (use YYYY-MM-DD and HH:MM).")]
    InvalidDateTime { date: String, time: String },
    #[error("Please choose a date in the present or future.")]
    InPast,
}

/// Unvalidated form input for a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub priority: Option<Priority>,
    pub category: String,
}

impl ReminderDraft {
    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            date: reminder.time.format(DATE_INPUT_FORMAT).to_string(),
            time: reminder.time.format(TIME_INPUT_FORMAT).to_string(),
            priority: Some(reminder.priority),
            category: reminder.category.clone(),
        }
    }

    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_INPUT_FORMAT).ok()?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_INPUT_FORMAT).ok()?;
        Some(date.and_time(time))
    }

    /// Checks presence of every field and that the due time is not before `now`.
    pub fn validate(&self, now: NaiveDateTime) -> Result<Reminder, ValidationError> {
        let blank = [
            &self.title,
            &self.description,
            &self.date,
            &self.time,
            &self.category,
        ]
        .iter()
        .any(|field| field.trim().is_empty());
        let Some(priority) = self.priority.filter(|_| !blank) else {
            return Err(ValidationError::MissingField);
        };

        let time = self
            .parsed_time()
            .ok_or_else(|| ValidationError::InvalidDateTime {
                date: self.date.clone(),
                time: self.time.clone(),
            })?;
        if time < now {
            return Err(ValidationError::InPast);
        }

        Ok(Reminder::new(
            self.title.trim(),
            self.description.trim(),
            time,
            priority,
            self.category.trim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 30)
            .unwrap()
    }

    fn draft() -> ReminderDraft {
        ReminderDraft {
            title: "Pay rent".to_string(),
            description: "Due monthly".to_string(),
            date: "2030-01-02".to_string(),
            time: "09:00".to_string(),
            priority: Some(Priority::High),
            category: "Finance".to_string(),
        }
    }

    #[test]
    fn complete_future_draft_validates() {
        let r = draft().validate(now()).unwrap();
        assert_eq!(r.title, "Pay rent");
        assert_eq!(r.priority, Priority::High);
        assert_eq!(r.time.format("%Y-%m-%d %H:%M").to_string(), "2030-01-02 09:00");
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let blanks: [fn(&mut ReminderDraft); 6] = [
            |d| d.title.clear(),
            |d| d.description = "  ".to_string(),
            |d| d.date.clear(),
            |d| d.time.clear(),
            |d| d.priority = None,
            |d| d.category.clear(),
        ];
        for blank in blanks {
            let mut d = draft();
            blank(&mut d);
            assert_eq!(d.validate(now()), Err(ValidationError::MissingField));
        }
    }

    #[test]
    fn past_time_is_rejected() {
        let mut d = draft();
        d.date = "2030-01-01".to_string();
        d.time = "12:00".to_string();
        assert_eq!(d.validate(now()), Err(ValidationError::InPast));
    }

    #[test]
    fn unreadable_date_is_reported() {
        let mut d = draft();
        d.date = "tomorrow".to_string();
        assert!(matches!(
            d.validate(now()),
            Err(ValidationError::InvalidDateTime { .. })
        ));
    }

    #[test]
    fn draft_from_reminder_round_trips() {
        let r = draft().validate(now()).unwrap();
        assert_eq!(ReminderDraft::from_reminder(&r), draft());
    }
}
