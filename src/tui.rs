use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{AppError, Result};

/// Terminal wrapper that manages raw mode and alternate screen.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Initialize the terminal: enter alternate screen and enable raw mode.
    /// A failure after raw mode is on hands the terminal back first.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("failed to enter raw mode: {e}")))?;
        Self::enter_screen().inspect_err(|_| release_terminal(&mut io::stdout()))
    }

    fn enter_screen() -> Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Rows available to the listing: the terminal height minus the bar.
    pub fn usable_height(&self) -> Result<usize> {
        let size = self.terminal.size()?;
        Ok(size.height.saturating_sub(1) as usize)
    }

    /// Force a full redraw on the next frame.
    pub fn sync(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }

    /// Get a mutable reference to the underlying terminal for drawing.
    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

/// Best-effort terminal release for paths that cannot propagate errors.
/// Also shows the cursor, which ratatui may have hidden.
fn release_terminal<W: Write>(out: &mut W) {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
}

/// Install a panic hook that restores the terminal before printing panic info.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        release_terminal(&mut io::stdout());
        original_hook(panic_info);
    }));
}
