//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes exist: `classic` (the default, plain terminal
//! colors) and `mocha`. The `custom` scheme starts from `classic` and
//! applies hex overrides from the config file.

use ratatui::style::{Color, Style};

use crate::config::{ThemeColorsConfig, ThemeConfig};

/// All runtime colors used in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    // Listing
    pub dir_fg: Color,
    pub file_fg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub match_fg: Color,

    // Status bar
    pub bar_fg: Color,
    pub bar_bg: Color,
    pub filter_bar_bg: Color,
}

impl ThemeColors {
    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selected_fg).bg(self.selected_bg)
    }

    pub fn entry_style(&self, is_dir: bool) -> Style {
        if is_dir {
            Style::default().fg(self.dir_fg)
        } else {
            Style::default().fg(self.file_fg)
        }
    }

    pub fn match_style(&self) -> Style {
        Style::default().fg(self.match_fg)
    }

    pub fn bar_style(&self) -> Style {
        Style::default().fg(self.bar_fg).bg(self.bar_bg)
    }

    pub fn filter_bar_style(&self) -> Style {
        Style::default().fg(self.bar_fg).bg(self.filter_bar_bg)
    }
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Plain ANSI colors that work on any terminal.
pub fn classic_theme() -> ThemeColors {
    ThemeColors {
        dir_fg: Color::Green,
        file_fg: Color::Reset,
        selected_fg: Color::White,
        selected_bg: Color::Magenta,
        match_fg: Color::Red,
        bar_fg: Color::Black,
        bar_bg: Color::Cyan,
        filter_bar_bg: Color::Yellow,
    }
}

/// Catppuccin Mocha palette.
pub fn mocha_theme() -> ThemeColors {
    ThemeColors {
        dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),     // #cdd6f4 (text)
        selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        match_fg: Color::Rgb(243, 139, 168),    // #f38ba8 (red)
        bar_fg: Color::Rgb(30, 30, 46),         // #1e1e2e (base)
        bar_bg: Color::Rgb(148, 226, 213),      // #94e2d5 (teal)
        filter_bar_bg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn override_color(slot: &mut Color, hex: Option<&str>) {
    if let Some(color) = hex.and_then(parse_hex_color) {
        *slot = color;
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"classic"` (default) or any unrecognized value: plain ANSI palette
/// - `"mocha"`: Catppuccin Mocha
/// - `"custom"`: classic palette with hex overrides applied
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("classic") {
        "mocha" => mocha_theme(),
        "custom" => {
            let mut theme = classic_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => classic_theme(),
    }
}

fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut theme.dir_fg, custom.dir_fg.as_deref());
    override_color(&mut theme.file_fg, custom.file_fg.as_deref());
    override_color(&mut theme.selected_fg, custom.selected_fg.as_deref());
    override_color(&mut theme.selected_bg, custom.selected_bg.as_deref());
    override_color(&mut theme.match_fg, custom.match_fg.as_deref());
    override_color(&mut theme.bar_fg, custom.bar_fg.as_deref());
    override_color(&mut theme.bar_bg, custom.bar_bg.as_deref());
    override_color(&mut theme.filter_bar_bg, custom.filter_bar_bg.as_deref());
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#1a1b26"), Some(Color::Rgb(26, 27, 38)));
    }

    #[test]
    fn test_parse_hex_color_without_hash() {
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_default_is_classic() {
        let theme = resolve_theme(&ThemeConfig::default());
        assert_eq!(theme, classic_theme());
        assert_eq!(theme.dir_fg, Color::Green);
    }

    #[test]
    fn test_resolve_mocha() {
        let config = ThemeConfig {
            scheme: Some("mocha".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config).dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_resolve_custom_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".to_string()),
            custom: Some(ThemeColorsConfig {
                dir_fg: Some("#1a1b26".to_string()),
                bar_bg: Some("#zzzzzz".to_string()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.dir_fg, Color::Rgb(26, 27, 38));
        // Invalid hex keeps the classic color
        assert_eq!(theme.bar_bg, Color::Cyan);
        assert_eq!(theme.match_fg, Color::Red);
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_classic() {
        let config = ThemeConfig {
            scheme: Some("neon".to_string()),
            custom: None,
        };
        assert_eq!(resolve_theme(&config), classic_theme());
    }

    #[test]
    fn test_styles_use_palette() {
        let theme = classic_theme();
        assert_eq!(theme.selected_style().bg, Some(Color::Magenta));
        assert_eq!(theme.entry_style(true).fg, Some(Color::Green));
        assert_eq!(theme.filter_bar_style().bg, Some(Color::Yellow));
    }
}
