use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;
        let style = theme::current().status;

        let mode = match app.input_mode {
            InputMode::Form if app.form_state.as_ref().is_some_and(|f| f.is_edit()) => {
                "[Edit Reminder]"
            }
            InputMode::Form => "[New Reminder]",
            InputMode::Normal => "[List]",
        };

        // Status message wins over hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            match app.input_mode {
                InputMode::Form => " Tab:Next Enter:Save Esc:Cancel ".to_string(),
                InputMode::Normal if w >= 80 => {
                    " jk:Move Enter:Detail n:New e:Edit d:Del r:Reload ?:Help q:Quit ".to_string()
                }
                InputMode::Normal if w >= 50 => " n:New e:Edit d:Del q:Quit ".to_string(),
                InputMode::Normal => " ?:Help q:Quit ".to_string(),
            }
        };

        let left = format!(" {} ", mode);
        let padding = " ".repeat(w.saturating_sub(left.len() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
