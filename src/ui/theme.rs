use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub label: Style,
    pub focused: Style,
    pub error: Style,
    pub hint: Style,
    pub progress_fill: Style,
    pub progress_empty: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub success: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            header: Style::new().color(Color::Magenta).bold(),
            label: Style::new(),
            focused: Style::new().color(Color::Cyan).bold(),
            error: Style::new().color(Color::Red),
            hint: Style::new().color(Color::DarkGrey),
            progress_fill: Style::new().color(Color::Blue),
            progress_empty: Style::new().color(Color::DarkGrey),
            button: Style::new().color(Color::White).background(Color::Blue).bold(),
            button_disabled: Style::new().color(Color::DarkGrey).dim(),
            success: Style::new().color(Color::Green).bold(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
