pub mod config;
pub mod logging;
pub mod reminders;

pub use config::Config;
pub use reminders::{
    JsonLinesCodec, PipeCodec, Priority, RecordCodec, Reminder, ReminderDraft, ReminderId,
    ReminderStore, StoreError, ValidationError,
};
