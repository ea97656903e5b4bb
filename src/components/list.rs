use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::listing::{Entry, SYNTHETIC_COUNT};
use crate::theme::ThemeColors;

/// Directory listing starting at the scroll offset.
pub struct EntryListWidget<'a> {
    entries: &'a [Entry],
    selected: Option<usize>,
    scroll_offset: usize,
    filter: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> EntryListWidget<'a> {
    pub fn new(entries: &'a [Entry], theme: &'a ThemeColors) -> Self {
        Self {
            entries,
            selected: None,
            scroll_offset: 0,
            filter: "",
            theme,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Highlight occurrences of `filter` in unselected rows.
    pub fn filter(mut self, filter: &'a str) -> Self {
        self.filter = filter;
        self
    }

    fn row_line(&self, idx: usize, entry: &'a Entry) -> Line<'a> {
        let name = entry.display_name.as_str();
        if self.selected == Some(idx) {
            return Line::from(Span::styled(name, self.theme.selected_style()));
        }

        let style = self.theme.entry_style(entry.is_dir);
        let matched = if self.filter.is_empty() || idx < SYNTHETIC_COUNT {
            None
        } else {
            name.find(self.filter)
        };

        match matched {
            Some(start) => {
                let end = start + self.filter.len();
                Line::from(vec![
                    Span::styled(&name[..start], style),
                    Span::styled(&name[start..end], self.theme.match_style()),
                    Span::styled(&name[end..], style),
                ])
            }
            None => Line::from(Span::styled(name, style)),
        }
    }
}

impl<'a> Widget for EntryListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible_height = area.height as usize;
        if visible_height == 0 || area.width == 0 {
            return;
        }

        let rows = self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (i, (idx, entry)) in rows.enumerate() {
            let y = area.y + i as u16;
            let line = self.row_line(idx, entry);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
