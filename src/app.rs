use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::filter::FilterState;
use crate::fs::listing::{build_entries, DirSource, Entry, FsSource, SYNTHETIC_COUNT};
use crate::fs::paths;

/// Default distance of a quick (Shift+arrow) selection move.
pub const DEFAULT_QUICK_STEP: usize = 5;

/// Which screen the explorer is showing and which handler owns the keyboard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum UiState {
    /// Plain directory listing.
    #[default]
    Browsing,
    /// Typing a filter; nothing is selected.
    EditingFilter,
    /// A non-empty filter narrows the listing.
    FilterApplied,
    /// Keybind reference covering the screen.
    HelpOverlay { return_to: Box<UiState> },
}

/// What fills the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Normal,
    KeybindHelp,
}

/// Which handler receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    FilterEntry,
    KeybindHelp,
}

/// What the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    ShowCurrentDir,
    FilterEntry,
    FilterApplied,
}

impl UiState {
    pub fn display_mode(&self) -> DisplayMode {
        match self {
            UiState::HelpOverlay { .. } => DisplayMode::KeybindHelp,
            _ => DisplayMode::Normal,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self {
            UiState::Browsing | UiState::FilterApplied => InputMode::Normal,
            UiState::EditingFilter => InputMode::FilterEntry,
            UiState::HelpOverlay { .. } => InputMode::KeybindHelp,
        }
    }

    /// The overlay leaves the bar of the state underneath untouched.
    pub fn bar_mode(&self) -> BarMode {
        match self {
            UiState::Browsing => BarMode::ShowCurrentDir,
            UiState::EditingFilter => BarMode::FilterEntry,
            UiState::FilterApplied => BarMode::FilterApplied,
            UiState::HelpOverlay { return_to } => return_to.bar_mode(),
        }
    }
}

/// Result of handling one event, consumed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    /// The user confirmed this absolute path.
    Confirm(PathBuf),
}

/// Explorer state: current directory, listing, selection, scroll window,
/// filter session and UI state.
pub struct App<S: DirSource = FsSource> {
    source: S,
    pub current_dir: PathBuf,
    pub entries: Vec<Entry>,
    /// `None` while a filter is being typed.
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub ui: UiState,
    pub filter: FilterState,
    /// Terminal rows available to the listing (status bar excluded).
    pub usable_height: usize,
    pub quick_step: usize,
}

impl<S: DirSource> App<S> {
    /// Create an explorer on `dir` and perform the first listing.
    pub fn new(source: S, dir: &Path, usable_height: usize) -> Result<Self> {
        let mut app = Self {
            source,
            current_dir: paths::clean(dir),
            entries: Vec::new(),
            selected: Some(0),
            scroll_offset: 0,
            ui: UiState::Browsing,
            filter: FilterState::default(),
            usable_height,
            quick_step: DEFAULT_QUICK_STEP,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Override the quick-step distance.
    pub fn with_quick_step(mut self, step: usize) -> Self {
        self.quick_step = step;
        self
    }

    // ── Recompute ────────────────────────────────────────────────────────

    /// Re-read the current directory, re-filter, re-sort and bring the
    /// selection and scroll window back within bounds.
    pub fn refresh(&mut self) -> Result<()> {
        let children = self
            .source
            .list(&self.current_dir)
            .map_err(|source| AppError::ReadDir {
                path: self.current_dir.clone(),
                source,
            })?;
        self.entries = build_entries(children, &self.filter.text);

        // The directory may have shrunk on disk since the last listing.
        if let Some(idx) = self.selected {
            if idx >= self.entries.len() {
                self.selected = Some(self.entries.len() - 1);
            }
        }
        self.update_scroll();
        Ok(())
    }

    /// Record a new terminal size. Takes effect on the next refresh.
    pub fn set_usable_height(&mut self, height: usize) {
        self.usable_height = height;
    }

    /// Scroll just enough to keep the selection on screen. With no
    /// selection the window returns to the top.
    pub fn update_scroll(&mut self) {
        let height = self.usable_height;
        if height == 0 {
            return;
        }
        match self.selected {
            Some(idx) if idx >= self.scroll_offset + height => {
                self.scroll_offset = idx + 1 - height;
            }
            Some(idx) if idx < self.scroll_offset => self.scroll_offset = idx,
            Some(_) => {}
            None => self.scroll_offset = 0,
        }
    }

    // ── Selection ────────────────────────────────────────────────────────

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    /// Select `idx` if it is in range and remember its name; otherwise
    /// leave the selection alone.
    fn select(&mut self, idx: usize) {
        if let Some(entry) = self.entries.get(idx) {
            self.filter.prev_selection = entry.display_name.clone();
            self.selected = Some(idx);
        }
    }

    /// Select the entry named `name`, or the first entry if none matches.
    fn select_by_name(&mut self, name: &str) {
        let idx = self
            .entries
            .iter()
            .position(|e| e.display_name == name)
            .unwrap_or(0);
        self.select(idx);
    }

    /// Move the selection by `delta`. Targets outside the listing are
    /// ignored rather than clamped.
    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };
        if let Some(target) = current.checked_add_signed(delta) {
            self.select(target);
        }
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_next_quick(&mut self) {
        self.move_selection(self.quick_step as isize);
    }

    pub fn select_previous_quick(&mut self) {
        self.move_selection(-(self.quick_step as isize));
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        self.select(0);
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        self.select(self.entries.len().saturating_sub(1));
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Absolute, cleaned path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|entry| paths::join(&self.current_dir, &entry.file_name))
    }

    fn navigate_to(&mut self, dir: PathBuf) {
        info!(from = %self.current_dir.display(), to = %dir.display(), "navigate");
        self.current_dir = dir;
        self.selected = Some(0);
        self.scroll_offset = 0;
        self.filter = FilterState::default();
        self.ui = UiState::Browsing;
    }

    /// Enter the selected directory. No-op on files.
    pub fn navigate_into(&mut self) {
        let target = match self.selected_entry() {
            Some(entry) if entry.is_dir => paths::join(&self.current_dir, &entry.file_name),
            _ => return,
        };
        self.navigate_to(target);
    }

    /// Go to the parent directory; at the root this stays put.
    pub fn navigate_to_parent(&mut self) {
        let parent = paths::parent(&self.current_dir);
        self.navigate_to(parent);
    }

    // ── Filter session ───────────────────────────────────────────────────

    pub fn begin_filter(&mut self) {
        if let Some(entry) = self.selected_entry() {
            self.filter.prev_selection = entry.display_name.clone();
        }
        self.filter.cursor_to_end();
        self.ui = UiState::EditingFilter;
        self.selected = None;
        debug!(filter = %self.filter.text, "begin filter entry");
    }

    /// Drop the filter and go back to the entry selected before it began.
    pub fn cancel_filter(&mut self) -> Result<()> {
        self.filter.clear();
        self.ui = UiState::Browsing;
        self.refresh()?;
        let prev = mem::take(&mut self.filter.prev_selection);
        self.select_by_name(&prev);
        debug!(restored = %prev, "filter cancelled");
        Ok(())
    }

    /// Keep the typed filter. An empty filter cancels instead.
    pub fn apply_filter(&mut self) -> Result<()> {
        if !self.filter.is_active() {
            return self.cancel_filter();
        }
        self.ui = UiState::FilterApplied;
        self.refresh()?;
        // Skip `.` and `..` when anything matched.
        let first = if self.entries.len() > SYNTHETIC_COUNT {
            SYNTHETIC_COUNT
        } else {
            0
        };
        self.select(first);
        info!(filter = %self.filter.text, matches = self.entries.len() - SYNTHETIC_COUNT, "filter applied");
        Ok(())
    }

    // ── Help overlay ─────────────────────────────────────────────────────

    pub fn open_help(&mut self) {
        let return_to = mem::take(&mut self.ui);
        self.ui = UiState::HelpOverlay {
            return_to: Box::new(return_to),
        };
    }

    pub fn close_help(&mut self) {
        if let UiState::HelpOverlay { return_to } = mem::take(&mut self.ui) {
            self.ui = *return_to;
        }
    }

    // ── Terminal outcomes ────────────────────────────────────────────────

    /// Confirm the current selection, if there is one.
    pub fn confirm(&self) -> Outcome {
        match self.selected_path() {
            Some(path) => {
                info!(path = %path.display(), "selection confirmed");
                Outcome::Confirm(path)
            }
            None => Outcome::Continue,
        }
    }
}
