use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

const KEYBINDS: &[KeyEntry] = &[
    KeyEntry {
        key: "Ctrl+C",
        description: "Quit",
    },
    KeyEntry {
        key: "?",
        description: "Open this help page",
    },
    KeyEntry {
        key: "[Shift] ↑/↓",
        description: "Change selection",
    },
    KeyEntry {
        key: "T/B",
        description: "Jump to top/bottom",
    },
    KeyEntry {
        key: "Space",
        description: "Open selected directory",
    },
    KeyEntry {
        key: "Backspace",
        description: "Open parent directory",
    },
    KeyEntry {
        key: "/",
        description: "Filter items",
    },
    KeyEntry {
        key: "Enter",
        description: "Print selected path and copy to clipboard",
    },
];

const HEADER: &[&str] = &["(Press any key to close.)", "", "Keybinds:", "──────────"];

/// Full-screen keybinding reference; any key dismisses it.
#[derive(Debug, Default)]
pub struct HelpOverlay;

impl HelpOverlay {
    /// Header lines followed by one line per key, descriptions aligned.
    fn content_lines() -> Vec<String> {
        let key_width = KEYBINDS.iter().map(|e| e.key.width()).max().unwrap_or(0);

        let mut lines: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        for entry in KEYBINDS {
            let pad = " ".repeat(key_width - entry.key.width());
            lines.push(format!("{}{}  {}", entry.key, pad, entry.description));
        }
        lines
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        for (i, text) in Self::content_lines()
            .into_iter()
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + i as u16, &Line::raw(text), area.width);
        }
    }
}
