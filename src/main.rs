mod app;
mod components;
mod event;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use chrono::{Local, NaiveDateTime};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use ratatui::layout::{Constraint, Layout, Rect};
use reminder_tui::{logging, Config, ReminderStore};

use crate::components::reminder_form::FormField;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init_logging(&config.logging.level, &config.logging.resolved_dir())?;
    theme::init(&config.theme);

    let path = config.storage.resolved_path();
    let store = ReminderStore::open(&path, config.storage.codec()?)?;
    info!(
        "event=app_ready module=main count={} path={}",
        store.len(),
        path.display()
    );
    let mut app = App::new(store, config.form.categories.clone());

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();
            let now = now();

            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            components::ReminderList::render(
                frame,
                layout[0],
                app.store().reminders().map(|(_, r)| r),
                app.selected,
                now,
            );

            if let Some(ref form) = app.form_state {
                components::ReminderForm::render(frame, area, form);
            }

            if app.show_detail {
                if let Some(reminder) = app.selected_reminder() {
                    components::detail::render_detail_popup(frame, area, reminder, now);
                }
            }

            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(frame, layout[1], app);
        })?;

        if let Some(key) = event::next_key_press(Duration::from_millis(250))? {
            handle_key(app, key);
        }
    }

    info!("event=app_exit module=main status=ok");
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key
    app.status_message = None;

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    if app.show_detail {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_detail();
        }
        return;
    }

    match app.input_mode {
        InputMode::Form => handle_form_input(app, key.code, key.modifiers),
        InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Home, _) | (KeyCode::Char('g'), _) => app.select_first(),
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => app.select_last(),
        (KeyCode::Char('n'), _) => app.open_new_form(now()),
        (KeyCode::Char('e'), _) => app.open_edit_form(),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => app.delete_selected(),
        (KeyCode::Char('r'), _) => app.reload(),
        (KeyCode::Enter, _) => app.open_detail(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let on_priority = app
        .form_state
        .as_ref()
        .is_some_and(|f| f.active_field == FormField::Priority);

    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.running = false,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => app.form_next_category(),
        (KeyCode::Esc, _) => app.close_form(),
        (KeyCode::Enter, _) => app.submit_form(now()),
        (KeyCode::Tab, _) | (KeyCode::Down, _) => app.form_tab(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => app.form_backtab(),
        (KeyCode::Backspace, _) => app.form_backspace(),
        (KeyCode::Right, _) if on_priority => {
            if let Some(ref mut form) = app.form_state {
                form.next_priority();
            }
        }
        (KeyCode::Left, _) if on_priority => {
            if let Some(ref mut form) = app.form_state {
                form.prev_priority();
            }
        }
        (KeyCode::Char(c), _) => app.form_input_char(c),
        _ => {}
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.clamp(30, 52).min(area.width);
    let popup_h = area.height.clamp(12, 22).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("List", section_style)),
        entry("j/k", "Move selection"),
        entry("g/G", "First / last reminder"),
        entry("Enter", "Show details"),
        entry("n", "New reminder"),
        entry("e", "Edit selected reminder"),
        entry("d", "Delete selected reminder"),
        entry("r", "Reload from file"),
        Line::from(""),
        Line::from(Span::styled("Form", section_style)),
        entry("Tab", "Next field"),
        entry("Space/\u{2190}\u{2192}", "Cycle priority"),
        entry("Ctrl-N", "Next category suggestion"),
        entry("Enter", "Save"),
        entry("Esc", "Cancel"),
        Line::from(""),
        entry("q", "Quit / close popup"),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
