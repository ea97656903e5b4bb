use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::app::BarMode;
use crate::theme::ThemeColors;

pub const HELP_HINT: &str = " (? for help)";
pub const FILTER_ENTRY_PROMPT: &str = "(Esc/Enter) Enter filter: ";
pub const FILTER_APPLIED_PROMPT: &str = "(Esc) Filter: ";

/// Bottom row: the current directory, or the filter being typed/applied.
pub struct StatusBarWidget<'a> {
    mode: BarMode,
    current_dir: &'a str,
    filter: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(mode: BarMode, current_dir: &'a str, filter: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            mode,
            current_dir,
            filter,
            theme,
        }
    }

    /// Column where the filter text begins, for placing the cursor.
    pub fn filter_column(mode: BarMode) -> u16 {
        match mode {
            BarMode::FilterEntry => FILTER_ENTRY_PROMPT.width() as u16,
            BarMode::FilterApplied => FILTER_APPLIED_PROMPT.width() as u16,
            BarMode::ShowCurrentDir => 0,
        }
    }

    fn base_style(&self) -> Style {
        match self.mode {
            BarMode::ShowCurrentDir => self.theme.bar_style(),
            BarMode::FilterEntry | BarMode::FilterApplied => self.theme.filter_bar_style(),
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let style = self.base_style();
        let bold = style.add_modifier(Modifier::BOLD);
        let row = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(row, style);

        let spans = match self.mode {
            BarMode::ShowCurrentDir => vec![
                Span::styled(self.current_dir, bold),
                Span::styled(HELP_HINT, style),
            ],
            BarMode::FilterEntry => vec![
                Span::styled(FILTER_ENTRY_PROMPT, bold),
                Span::styled(self.filter, style),
            ],
            BarMode::FilterApplied => vec![
                Span::styled(FILTER_APPLIED_PROMPT, bold),
                Span::styled(self.filter, style),
            ],
        };

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
