use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::Priority;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub title_fg: Color,
    pub title_bg: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub done: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,
    pub context: Color,
    pub error: Color,
    pub info: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xCD, 0xD6, 0xF4),
            dim: Color::Rgb(0x6C, 0x70, 0x86),
            title_fg: Color::Rgb(0xFF, 0xFD, 0xF5),
            title_bg: Color::Rgb(0x25, 0xA0, 0x65),
            selection_fg: Color::Rgb(0xEE, 0x6F, 0xF8),
            selection_bg: Color::Rgb(0x31, 0x32, 0x44),
            done: Color::Rgb(0xA6, 0xE3, 0xA1),
            priority_high: Color::Rgb(0xF3, 0x8B, 0xA8),
            priority_medium: Color::Rgb(0xFA, 0xB3, 0x87),
            priority_low: Color::Rgb(0xF9, 0xE2, 0xAF),
            context: Color::Rgb(0x89, 0xB4, 0xFA),
            error: Color::Rgb(0xF3, 0x8B, 0xA8),
            info: Color::Rgb(0x89, 0xB4, 0xFA),
            search_match_bg: Color::Rgb(0xF9, 0xE2, 0xAF),
            search_match_fg: Color::Rgb(0x1E, 0x1E, 0x2E),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults.
    /// Unknown slot names and malformed colors are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "title_fg" => theme.title_fg = color,
                "title_bg" => theme.title_bg = color,
                "selection_fg" => theme.selection_fg = color,
                "selection_bg" => theme.selection_bg = color,
                "done" => theme.done = color,
                "priority_high" => theme.priority_high = color,
                "priority_medium" => theme.priority_medium = color,
                "priority_low" => theme.priority_low = color,
                "context" => theme.context = color,
                "error" => theme.error = color,
                "info" => theme.info = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }

        theme
    }

    /// Color of the priority marker
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
            Priority::None => self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#EE6FF8"),
            Some(Color::Rgb(0xEE, 0x6F, 0xF8))
        );
        assert_eq!(parse_hex_color("EE6FF8"), None);
        assert_eq!(parse_hex_color("#EE6F"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("selection_bg".into(), "#000000".into());
        ui.colors.insert("nonsense".into(), "#112233".into());
        ui.colors.insert("done".into(), "green".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.selection_bg, Color::Rgb(0, 0, 0));
        assert_eq!(theme.done, Theme::default().done);
    }

    #[test]
    fn test_priority_color() {
        let theme = Theme::default();
        assert_eq!(theme.priority_color(Priority::High), theme.priority_high);
        assert_eq!(theme.priority_color(Priority::None), theme.text);
    }
}
