use chrono::NaiveDateTime;
use log::warn;
use reminder_tui::{Reminder, ReminderId, ReminderStore, StoreError};

use crate::components::reminder_form::ReminderFormState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub selected: Option<usize>,
    pub form_state: Option<ReminderFormState>,
    pub show_detail: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    categories: Vec<String>,
    store: ReminderStore,
}

impl App {
    pub fn new(store: ReminderStore, categories: Vec<String>) -> Self {
        let selected = (!store.is_empty()).then_some(0);
        Self {
            running: true,
            input_mode: InputMode::Normal,
            selected,
            form_state: None,
            show_detail: false,
            show_help: false,
            status_message: None,
            categories,
            store,
        }
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    pub fn selected_id(&self) -> Option<ReminderId> {
        self.selected.and_then(|i| self.store.id_at(i))
    }

    pub fn selected_reminder(&self) -> Option<&Reminder> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(len - 1)));
    }

    pub fn select_prev(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    pub fn select_first(&mut self) {
        self.selected = (!self.store.is_empty()).then_some(0);
    }

    pub fn select_last(&mut self) {
        self.selected = self.store.len().checked_sub(1);
    }

    pub fn open_new_form(&mut self, now: NaiveDateTime) {
        self.form_state = Some(ReminderFormState::new(now));
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status_message = Some("Please select a reminder to edit.".to_string());
            return;
        };
        if let Some(reminder) = self.store.get(id) {
            self.form_state = Some(ReminderFormState::edit(id, reminder));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    /// Adds or updates from the form. On any failure the form stays open and
    /// the reason goes to the status bar.
    pub fn submit_form(&mut self, now: NaiveDateTime) {
        let Some(form) = self.form_state.as_ref() else {
            return;
        };

        let reminder = match form.draft.validate(now) {
            Ok(reminder) => reminder,
            Err(err) => {
                self.status_message = Some(err.to_string());
                return;
            }
        };

        let title = reminder.title.clone();
        let result = match form.target {
            Some(id) => self.store.update(id, reminder).map(|()| (id, "updated")),
            None => self.store.add(reminder).map(|id| (id, "added")),
        };

        match result {
            Ok((id, verb)) => {
                self.selected = self.store.position(id);
                self.status_message = Some(format!("Reminder \"{}\" {}", title, verb));
                self.close_form();
            }
            Err(err) => self.report(err),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status_message = Some("Please select a reminder to delete.".to_string());
            return;
        };

        match self.store.remove(id) {
            Ok(removed) => {
                self.clamp_selection();
                self.status_message = Some(format!("Deleted \"{}\"", removed.title));
            }
            Err(err) => self.report(err),
        }
    }

    pub fn open_detail(&mut self) {
        if self.selected_reminder().is_some() {
            self.show_detail = true;
        }
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    /// Re-read the file, e.g. after it was edited by hand.
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(count) => {
                self.clamp_selection();
                self.status_message = Some(format!("Loaded {} reminders", count));
            }
            Err(err) => self.report(err),
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.active_field = form.active_field.prev();
        }
    }

    pub fn form_next_category(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.next_category(&self.categories);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }

    fn report(&mut self, err: StoreError) {
        warn!("event=store_op module=app status=error error={}", err);
        let message = match err {
            StoreError::Validation(err) => err.to_string(),
            StoreError::NoSelection => "The selected reminder no longer exists.".to_string(),
            err @ StoreError::Read { .. } => format!("Reload failed, keeping current list: {}", err),
            other => format!("Save failed: {}", other),
        };
        self.status_message = Some(message);
    }
}
