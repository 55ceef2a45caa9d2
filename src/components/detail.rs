use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use reminder_tui::Reminder;

use crate::theme;

pub fn render_detail_popup(frame: &mut Frame, area: Rect, reminder: &Reminder, now: NaiveDateTime) {
    let popup_w = area.width.clamp(30, 56).min(area.width);
    let popup_h = area.height.clamp(10, 14).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let theme = theme::current();
    let block = Block::default()
        .title(format!(" {} ", reminder.title))
        .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let due = reminder.time.format("%A, %B %d, %Y at %H:%M").to_string();
    let mut due_line = vec![
        Span::styled("Due: ", theme.dim),
        Span::styled(due, Style::default()),
    ];
    if reminder.is_overdue(now) {
        due_line.push(Span::styled(" (overdue)", theme.overdue));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("Priority: ", theme.dim),
            Span::styled(reminder.priority.label(), theme.priority(reminder.priority)),
        ]),
        Line::from(vec![
            Span::styled("Category: ", theme.dim),
            Span::styled(reminder.category.clone(), Style::default()),
        ]),
        Line::from(due_line),
        Line::from(""),
        Line::from(reminder.description.clone()),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", theme.dim)),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
