//! TUI theme and styling

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Task and action colors
    pub checkbox: Color,
    pub error: Color,
    pub accent: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::ink()
    }
}

impl Theme {
    /// Resolve a theme by its config name. Unknown names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "mono" => Self::mono(),
            "default" | "ink" | "" => Self::ink(),
            other => {
                tracing::warn!("unknown theme '{}', using default", other);
                Self::ink()
            }
        }
    }

    pub fn ink() -> Self {
        Self {
            background: Color::Rgb(26, 26, 26),
            surface: Color::Rgb(38, 38, 38),
            border: Color::Rgb(13, 13, 13),
            selection: Color::Rgb(51, 51, 51),

            title: Color::Rgb(78, 168, 222),
            text: Color::Rgb(242, 242, 242),
            dimmed: Color::Rgb(128, 128, 128),
            hint: Color::Rgb(128, 128, 128),

            checkbox: Color::Rgb(94, 96, 206),
            error: Color::Rgb(226, 88, 88),
            accent: Color::Rgb(78, 168, 222),
            disabled: Color::Rgb(28, 39, 51),
        }
    }

    pub fn mono() -> Self {
        Self {
            background: Color::Reset,
            surface: Color::Reset,
            border: Color::Gray,
            selection: Color::DarkGray,

            title: Color::White,
            text: Color::White,
            dimmed: Color::DarkGray,
            hint: Color::Gray,

            checkbox: Color::White,
            error: Color::White,
            accent: Color::White,
            disabled: Color::DarkGray,
        }
    }
}
