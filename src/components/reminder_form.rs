use chrono::{Duration, NaiveDateTime, Timelike};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use reminder_tui::reminders::draft::{DATE_INPUT_FORMAT, TIME_INPUT_FORMAT};
use reminder_tui::{Reminder, ReminderDraft, ReminderId};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Time,
    Priority,
    Category,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Priority,
            FormField::Priority => FormField::Category,
            FormField::Category => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Category,
            FormField::Description => FormField::Title,
            FormField::Date => FormField::Description,
            FormField::Time => FormField::Date,
            FormField::Priority => FormField::Time,
            FormField::Category => FormField::Priority,
        }
    }
}

/// Form contents plus the reminder being edited, if any.
#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub draft: ReminderDraft,
    pub target: Option<ReminderId>,
    pub active_field: FormField,
    category_index: Option<usize>,
}

impl ReminderFormState {
    /// Empty form, due at the next full hour. Priority starts unselected.
    pub fn new(now: NaiveDateTime) -> Self {
        let due = (now + Duration::hours(1))
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .unwrap_or(now);
        Self {
            draft: ReminderDraft {
                date: due.format(DATE_INPUT_FORMAT).to_string(),
                time: due.format(TIME_INPUT_FORMAT).to_string(),
                ..ReminderDraft::default()
            },
            target: None,
            active_field: FormField::Title,
            category_index: None,
        }
    }

    pub fn edit(id: ReminderId, reminder: &Reminder) -> Self {
        Self {
            draft: ReminderDraft::from_reminder(reminder),
            target: Some(id),
            active_field: FormField::Title,
            category_index: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.active_field {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::Date => Some(&mut self.draft.date),
            FormField::Time => Some(&mut self.draft.time),
            FormField::Category => Some(&mut self.draft.category),
            FormField::Priority => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.active_field == FormField::Priority {
            if c == ' ' {
                self.next_priority();
            }
            return;
        }
        if let Some(text) = self.active_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.active_field == FormField::Priority {
            self.draft.priority = None;
        } else if let Some(text) = self.active_text() {
            text.pop();
        }
    }

    pub fn next_priority(&mut self) {
        self.draft.priority = Some(
            self.draft
                .priority
                .map_or(reminder_tui::Priority::High, |p| p.next()),
        );
    }

    pub fn prev_priority(&mut self) {
        self.draft.priority = Some(
            self.draft
                .priority
                .map_or(reminder_tui::Priority::Low, |p| p.prev()),
        );
    }

    /// Replace the category with the next configured suggestion.
    pub fn next_category(&mut self, suggestions: &[String]) {
        if suggestions.is_empty() {
            return;
        }
        let index = self
            .category_index
            .map_or(0, |i| (i + 1) % suggestions.len());
        self.category_index = Some(index);
        self.draft.category = suggestions[index].clone();
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState) {
        let form_w = area.width.clamp(30, 60).min(area.width);
        let form_h = area.height.clamp(10, 13).min(area.height);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = if state.is_edit() {
            " Edit Reminder "
        } else {
            " New Reminder "
        };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // description
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // priority
            Constraint::Length(1), // category
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let draft = &state.draft;
        let active = state.active_field;
        render_field(frame, rows[0], "Title:", &draft.title, active == FormField::Title);
        render_field(frame, rows[1], "Notes:", &draft.description, active == FormField::Description);
        render_field(frame, rows[2], "Date:", &draft.date, active == FormField::Date);
        render_field(frame, rows[3], "Time:", &draft.time, active == FormField::Time);

        let priority = draft.priority.map_or("< select >", |p| p.label());
        render_field(frame, rows[4], "Prio:", priority, active == FormField::Priority);
        render_field(frame, rows[5], "Cat:", &draft.category, active == FormField::Category);

        let key = Style::default().add_modifier(Modifier::BOLD);
        let dim = theme::current().dim;
        let mut help = vec![
            Span::styled("Tab", key),
            Span::styled(":Next ", dim),
            Span::styled("Enter", key),
            Span::styled(":Save ", dim),
            Span::styled("Esc", key),
            Span::styled(":Cancel", dim),
        ];
        match active {
            FormField::Priority => {
                help.push(Span::styled(" Space", key));
                help.push(Span::styled(":Cycle", dim));
            }
            FormField::Category => {
                help.push(Span::styled(" ^N", key));
                help.push(Span::styled(":Suggest", dim));
            }
            _ => {}
        }
        frame.render_widget(Paragraph::new(Line::from(help)), rows[7]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reminder_tui::Priority;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 1)
            .unwrap()
            .and_hms_opt(14, 20, 11)
            .unwrap()
    }

    #[test]
    fn new_form_defaults_to_next_full_hour() {
        let form = ReminderFormState::new(now());
        assert_eq!(form.draft.date, "2030-06-01");
        assert_eq!(form.draft.time, "15:00");
        assert_eq!(form.draft.priority, None);
        assert!(!form.is_edit());
    }

    #[test]
    fn typing_goes_to_active_text_field() {
        let mut form = ReminderFormState::new(now());
        for c in "Hi".chars() {
            form.input_char(c);
        }
        form.active_field = FormField::Category;
        form.input_char('W');
        form.backspace();
        form.input_char('X');
        assert_eq!(form.draft.title, "Hi");
        assert_eq!(form.draft.category, "X");
    }

    #[test]
    fn priority_field_cycles_instead_of_typing() {
        let mut form = ReminderFormState::new(now());
        form.active_field = FormField::Priority;
        form.input_char(' ');
        assert_eq!(form.draft.priority, Some(Priority::High));
        form.input_char('x');
        form.next_priority();
        assert_eq!(form.draft.priority, Some(Priority::Medium));
        form.backspace();
        assert_eq!(form.draft.priority, None);
        form.prev_priority();
        assert_eq!(form.draft.priority, Some(Priority::Low));
    }

    #[test]
    fn category_suggestions_wrap() {
        let mut form = ReminderFormState::new(now());
        let suggestions = vec!["Work".to_string(), "Home".to_string()];
        form.next_category(&suggestions);
        form.next_category(&suggestions);
        form.next_category(&suggestions);
        assert_eq!(form.draft.category, "Work");
        form.next_category(&[]);
        assert_eq!(form.draft.category, "Work");
    }
}
