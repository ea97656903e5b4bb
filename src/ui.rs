use ratatui::{
    layout::{Constraint, Layout, Position},
    Frame,
};

use crate::app::{App, BarMode, DisplayMode};
use crate::components::help::HelpOverlay;
use crate::components::list::EntryListWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::fs::listing::DirSource;
use crate::theme::ThemeColors;

/// Render the application UI. The cursor stays hidden unless a filter is
/// being typed.
pub fn render<S: DirSource>(app: &App<S>, theme: &ThemeColors, frame: &mut Frame) {
    let area = frame.area();

    if app.ui.display_mode() == DisplayMode::KeybindHelp {
        frame.render_widget(HelpOverlay, area);
        return;
    }

    let [list_area, bar_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let list = EntryListWidget::new(&app.entries, theme)
        .selected(app.selected)
        .scroll_offset(app.scroll_offset)
        .filter(&app.filter.text);
    frame.render_widget(list, list_area);

    let bar_mode = app.ui.bar_mode();
    let current_dir = app.current_dir.to_string_lossy();
    let bar = StatusBarWidget::new(bar_mode, &current_dir, &app.filter.text, theme);
    frame.render_widget(bar, bar_area);

    if bar_mode == BarMode::FilterEntry {
        let x = bar_area.x
            + StatusBarWidget::filter_column(bar_mode)
            + app.filter.cursor_column() as u16;
        frame.set_cursor_position(Position::new(x, bar_area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::listing::MemorySource;
    use crate::theme::classic_theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::Path;

    fn setup_app(height: usize) -> App<MemorySource> {
        let source = MemorySource::default()
            .with_dir("/root", &[("b.txt", false), ("a.txt", false), ("Z", true)]);
        App::new(source, Path::new("/root"), height).unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn normal_screen_has_listing_and_bar() {
        let app = setup_app(5);
        let theme = classic_theme();
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal.draw(|f| render(&app, &theme, f)).unwrap();

        let rows = screen(&terminal);
        assert_eq!(&rows[..5], &[".", "..", "Z/", "a.txt", "b.txt"]);
        assert_eq!(rows[5], "/root (? for help)");
    }

    #[test]
    fn help_screen_replaces_listing() {
        let mut app = setup_app(5);
        app.open_help();
        let theme = classic_theme();
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|f| render(&app, &theme, f)).unwrap();

        let rows = screen(&terminal);
        assert_eq!(rows[0], "(Press any key to close.)");
        assert!(!rows.iter().any(|r| r.contains("(? for help)")));
    }

    #[test]
    fn filter_entry_shows_cursor() {
        let mut app = setup_app(5);
        app.begin_filter();
        app.filter.insert_char('a');
        app.refresh().unwrap();
        let theme = classic_theme();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|f| render(&app, &theme, f)).unwrap();

        let rows = screen(&terminal);
        assert_eq!(rows[5], "(Esc/Enter) Enter filter: a");
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            Position::new(27, 5)
        );
    }
}
