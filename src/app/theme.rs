//! UI theme: the configurable colors, gathered in one place instead of
//! scattered through render code. Two palettes (dark/light) stand in for the
//! original dashboard's theme toggle.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub mode: ThemeMode,
    pub header_fg: Color,
    pub accent_fg: Color,
    pub text_fg: Color,
    pub muted_fg: Color,
    pub dir_fg: Color,
    pub error_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// Cycled through for the segments of the language bar.
    pub bar_colors: [Color; 6],
}

impl UiTheme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            header_fg: Color::Cyan,
            accent_fg: Color::Cyan,
            text_fg: Color::White,
            muted_fg: Color::DarkGray,
            dir_fg: Color::LightBlue,
            error_fg: Color::Red,
            focus_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selected_bg: Color::Rgb(60, 66, 82),
            selected_fg: Color::White,
            bar_colors: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            header_fg: Color::Blue,
            accent_fg: Color::Blue,
            text_fg: Color::Black,
            muted_fg: Color::Gray,
            dir_fg: Color::Blue,
            error_fg: Color::Red,
            focus_border: Color::Blue,
            inactive_border: Color::Gray,
            selected_bg: Color::Rgb(208, 214, 229),
            selected_fg: Color::Black,
            bar_colors: [
                Color::Blue,
                Color::Magenta,
                Color::Rgb(180, 130, 0),
                Color::Green,
                Color::Cyan,
                Color::Red,
            ],
        }
    }

    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        }
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        let theme = UiTheme::default();
        assert_eq!(theme.mode, ThemeMode::Dark);
        assert_eq!(theme.toggled().mode, ThemeMode::Light);
        assert_eq!(theme.toggled().toggled().mode, ThemeMode::Dark);
    }
}
