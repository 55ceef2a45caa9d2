pub mod codec;
pub mod draft;
pub mod reminder;
pub mod store;

pub use codec::{JsonLinesCodec, PipeCodec, RecordCodec};
pub use draft::{ReminderDraft, ValidationError};
pub use reminder::{Priority, Reminder, ReminderId};
pub use store::{ReminderStore, StoreError};
