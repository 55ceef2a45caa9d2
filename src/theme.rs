use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use reminder_tui::config::ThemeConfig;
use reminder_tui::Priority;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has an effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(Theme::from_config(config));
}

/// Get the active theme (default until `init` runs).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub high: Style,
    pub medium: Style,
    pub low: Style,
    pub overdue: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            high: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            medium: Style::default().fg(Color::Yellow),
            low: Style::default().fg(Color::Green),
            overdue: Style::default().fg(Color::LightRed).add_modifier(Modifier::ITALIC),
        }
    }
}

impl Theme {
    pub fn priority(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            high: Style::default().fg(Color::Rgb(255, 85, 85)).add_modifier(Modifier::BOLD),
            medium: Style::default().fg(Color::Rgb(241, 250, 140)),
            low: Style::default().fg(Color::Rgb(80, 250, 123)),
            overdue: Style::default().fg(Color::Rgb(255, 121, 198)).add_modifier(Modifier::ITALIC),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            high: Style::default().fg(Color::Rgb(251, 73, 52)).add_modifier(Modifier::BOLD),
            medium: Style::default().fg(Color::Rgb(250, 189, 47)),
            low: Style::default().fg(Color::Rgb(184, 187, 38)),
            overdue: Style::default().fg(Color::Rgb(254, 128, 25)).add_modifier(Modifier::ITALIC),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            high: Style::default().fg(Color::Rgb(191, 97, 106)).add_modifier(Modifier::BOLD),
            medium: Style::default().fg(Color::Rgb(235, 203, 139)),
            low: Style::default().fg(Color::Rgb(163, 190, 140)),
            overdue: Style::default().fg(Color::Rgb(208, 135, 112)).add_modifier(Modifier::ITALIC),
        }
    }

    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = config
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let fg_overrides = [
            (&config.selected_fg, &mut theme.selected),
            (&config.header_fg, &mut theme.header),
            (&config.dim_fg, &mut theme.dim),
            (&config.border_fg, &mut theme.border),
            (&config.status_fg, &mut theme.status),
            (&config.high_fg, &mut theme.high),
            (&config.medium_fg, &mut theme.medium),
            (&config.low_fg, &mut theme.low),
            (&config.overdue_fg, &mut theme.overdue),
        ];
        for (value, style) in fg_overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.fg(c);
            }
        }

        if let Some(c) = config.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = config.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// `#rrggbb`, a terminal colour name, or a 256-colour index. Unknown
/// values leave the preset colour in place.
fn parse_color(s: &str) -> Option<Color> {
    s.trim().parse::<Color>().ok()
}
