use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode, Outcome};
use crate::error::Result;
use crate::fs::listing::DirSource;

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Handle a key event, then recompute the listing.
pub fn handle_key_event<S: DirSource>(app: &mut App<S>, key: KeyEvent) -> Result<Outcome> {
    if key.kind != KeyEventKind::Press {
        return Ok(Outcome::Continue);
    }

    let outcome = match app.ui.input_mode() {
        InputMode::Normal => handle_normal_key(app, key)?,
        InputMode::FilterEntry => handle_filter_key(app, key)?,
        InputMode::KeybindHelp => handle_help_key(app, key),
    };

    if outcome == Outcome::Continue {
        app.refresh()?;
    }
    Ok(outcome)
}

fn handle_normal_key<S: DirSource>(app: &mut App<S>, key: KeyEvent) -> Result<Outcome> {
    if is_ctrl_c(&key) {
        return Ok(Outcome::Quit);
    }
    let quick = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Up if quick => app.select_previous_quick(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down if quick => app.select_next_quick(),
        KeyCode::Down => app.select_next(),
        KeyCode::Backspace => app.navigate_to_parent(),
        KeyCode::Enter => return Ok(app.confirm()),
        KeyCode::Esc => app.cancel_filter()?,
        KeyCode::Char('t') => app.select_first(),
        KeyCode::Char('b') => app.select_last(),
        KeyCode::Char(' ') => app.navigate_into(),
        KeyCode::Char('/') => app.begin_filter(),
        KeyCode::Char('?') => app.open_help(),
        _ => {}
    }
    Ok(Outcome::Continue)
}

fn handle_filter_key<S: DirSource>(app: &mut App<S>, key: KeyEvent) -> Result<Outcome> {
    if is_ctrl_c(&key) {
        return Ok(Outcome::Quit);
    }

    match key.code {
        KeyCode::Esc => app.cancel_filter()?,
        KeyCode::Enter => app.apply_filter()?,
        KeyCode::Left => app.filter.move_cursor_left(),
        KeyCode::Right => app.filter.move_cursor_right(),
        KeyCode::Backspace => app.filter.delete_char(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.filter.insert_char(c)
        }
        _ => {}
    }
    Ok(Outcome::Continue)
}

/// Any key closes the overlay; Ctrl+C still quits.
fn handle_help_key<S: DirSource>(app: &mut App<S>, key: KeyEvent) -> Outcome {
    if is_ctrl_c(&key) {
        return Outcome::Quit;
    }
    app.close_help();
    Outcome::Continue
}
