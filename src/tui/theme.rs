//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::output::parse_hex_color;

/// Theme selection from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Podium positions
    pub gold: Color,
    pub silver: Color,
    pub bronze: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,
    pub detail_color: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tabs
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Calendar tags
    pub sprint_tag: Color,
    pub rain_tag: Color,
    pub complete_tag: Color,
    pub pending_tag: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_color: Color,

    // Popup overlay
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            gold: Color::Yellow,
            silver: Color::Gray,
            bronze: Color::Rgb(0xd9, 0x77, 0x06),
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            detail_color: Color::Gray,
            muted: Color::Gray,
            title_color: Color::Red,
            tab_active_style: Style::new().fg(Color::Red).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            sprint_tag: Color::Magenta,
            rain_tag: Color::Blue,
            complete_tag: Color::Green,
            pending_tag: Color::DarkGray,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Red,
            flash_color: Color::Yellow,
            popup_border: Color::Red,
            popup_title: Style::new().fg(Color::Red).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            gold: Color::Rgb(0xb4, 0x8a, 0x00),
            silver: Color::DarkGray,
            bronze: Color::Rgb(0xa0, 0x52, 0x00),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            detail_color: Color::DarkGray,
            muted: Color::DarkGray,
            title_color: Color::Red,
            tab_active_style: Style::new().fg(Color::Red).bold(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            sprint_tag: Color::Magenta,
            rain_tag: Color::Blue,
            complete_tag: Color::Green,
            pending_tag: Color::Gray,
            status_bar_bg: Color::Indexed(252),
            status_key_color: Color::Red,
            flash_color: Color::Rgb(0xa0, 0x52, 0x00),
            popup_border: Color::Red,
            popup_title: Style::new().fg(Color::Red).bold(),
        }
    }

    /// Color for a championship position (podium places highlighted)
    pub fn position_color(&self, position: usize) -> Color {
        match position {
            1 => self.gold,
            2 => self.silver,
            3 => self.bronze,
            _ => self.index_color,
        }
    }

    /// Team accent color; unknown or malformed colors fall back to muted
    pub fn team_color(&self, hex: Option<&str>) -> Color {
        hex.and_then(parse_hex_color)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(self.muted)
    }
}

/// Pick a palette. `Auto` asks the terminal for its background brightness
/// and falls back to dark when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_colors() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.position_color(1), theme.gold);
        assert_eq!(theme.position_color(3), theme.bronze);
        assert_eq!(theme.position_color(4), theme.index_color);
    }

    #[test]
    fn test_team_color() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.team_color(Some("#00d2be")), Color::Rgb(0, 0xd2, 0xbe));
        assert_eq!(theme.team_color(Some("teal")), theme.muted);
        assert_eq!(theme.team_color(None), theme.muted);
    }

    #[test]
    fn test_explicit_theme_skips_detection() {
        assert_eq!(resolve_theme(Theme::Light).muted, ThemeColors::light().muted);
        assert_eq!(resolve_theme(Theme::Dark).muted, ThemeColors::dark().muted);
    }
}
