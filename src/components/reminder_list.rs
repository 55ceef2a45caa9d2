use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use reminder_tui::{Priority, Reminder};

use crate::theme;

pub struct ReminderList;

impl ReminderList {
    pub fn render<'a>(
        frame: &mut Frame,
        area: Rect,
        reminders: impl ExactSizeIterator<Item = &'a Reminder>,
        selected: Option<usize>,
        now: NaiveDateTime,
    ) {
        let theme = theme::current();
        let w = area.width as usize;
        let count = reminders.len();

        let title = if w >= 25 {
            format!(" Reminders ({}) ", count)
        } else {
            " Reminders ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        if count == 0 {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No reminders. Press n to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = reminders
            .map(|reminder| format_reminder(reminder, inner_w, now))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected);
        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::High => " !!! ",
        Priority::Medium => " !!  ",
        Priority::Low => " !   ",
    }
}

fn format_reminder(reminder: &Reminder, max_width: usize, now: NaiveDateTime) -> ListItem<'static> {
    let theme = theme::current();
    let overdue = reminder.is_overdue(now);

    let due = if overdue {
        format!(" {} (overdue)", reminder.time_display())
    } else {
        format!(" {}", reminder.time_display())
    };
    let category = format!(" [{}]", reminder.category);

    let badge = priority_badge(reminder.priority);
    let fixed = badge.len() + due.len() + category.len();
    let title_w = max_width.saturating_sub(fixed).max(8);

    let mut spans = vec![
        Span::styled(badge, theme.priority(reminder.priority)),
        Span::styled(truncate(&reminder.title, title_w), Style::default()),
    ];
    if fixed < max_width {
        spans.push(Span::styled(category, theme.dim));
        spans.push(Span::styled(
            due,
            if overdue { theme.overdue } else { theme.dim },
        ));
    }

    ListItem::new(Line::from(spans))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Zahnarzttermin", 8), "Zahna...");
        assert_eq!(truncate("ééééé", 4), "é...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
