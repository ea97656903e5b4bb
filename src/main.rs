mod app;
mod components;
mod config;
mod error;
mod event;
mod filter;
mod fs;
mod handler;
mod theme;
mod tui;
mod ui;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::{App, Outcome};
use crate::config::{AppConfig, GeneralConfig};
use crate::error::{AppError, Result};
use crate::event::{Event, EventSource};
use crate::fs::clipboard::{ClipboardSink, SystemClipboard};
use crate::fs::listing::FsSource;
use crate::fs::paths;
use crate::theme::{resolve_theme, ThemeColors};
use crate::tui::{install_panic_hook, Tui};

/// tpick - Terminal file picker
///
/// Browse to an entry and press Enter to print its path and copy it to
/// the clipboard.
#[derive(Parser, Debug)]
#[command(name = "tpick", version, about, override_usage = "tpick [directory]")]
struct Cli {
    /// (Optional) Starting directory
    #[arg(value_name = "directory")]
    paths: Vec<PathBuf>,

    /// Config file to load on top of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (level from $TPICK_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    Run(Cli),
    /// Unknown flags or too many paths.
    Usage,
    /// `--help` and `--version`, printed by clap.
    Info(clap::Error),
}

fn classify<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) if cli.paths.len() <= 1 => Invocation::Run(cli),
        Ok(_) => Invocation::Usage,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(_) => Invocation::Usage,
    }
}

/// Bad arguments are a usage hint, not a failure.
fn print_usage_hint() -> ExitCode {
    println!("Error: Invalid arguments");
    println!();
    // Nothing left to report to if stdout is gone.
    Cli::command().print_help().ok();
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = match classify(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Usage => return print_usage_hint(),
        Invocation::Info(e) => e.exit(),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = AppConfig {
        general: GeneralConfig {
            log_file: cli.log_file.clone(),
            ..Default::default()
        },
        ..Default::default()
    };
    let config = AppConfig::load(cli.config.as_deref(), Some(&overrides));
    if let Some(log_path) = config.log_file() {
        init_logging(log_path)?;
    }

    let start_dir = resolve_start_dir(cli.paths.first().map(PathBuf::as_path))?;
    let theme = resolve_theme(&config.theme);
    info!(dir = %start_dir.display(), "starting");

    install_panic_hook();
    let mut tui = Tui::new()?;
    let result = event_loop(
        &mut tui,
        &start_dir,
        &theme,
        config.quick_step(),
        &mut SystemClipboard,
    );
    let restored = tui.restore();

    let selection = result?;
    restored?;

    if let Some(path) = selection {
        let mut stdout = io::stdout();
        write!(stdout, "{}", path.display())?;
        stdout.flush()?;
    }
    Ok(())
}

/// Send tracing output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_env("TPICK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

/// Absolute starting directory. A file argument resolves to its directory.
fn resolve_start_dir(arg: Option<&Path>) -> Result<PathBuf> {
    let arg = arg.unwrap_or(Path::new("."));
    let dir = paths::absolute(arg).map_err(|e| {
        AppError::InvalidPath(format!("failed to resolve {}: {e}", arg.display()))
    })?;

    let metadata = match std::fs::metadata(&dir) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::InvalidPath(format!(
                "directory '{}' does not exist",
                dir.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if metadata.is_dir() {
        Ok(dir)
    } else {
        Ok(paths::parent(&dir))
    }
}

/// Copy the confirmed path to the clipboard; the path is only emitted if
/// the copy succeeds.
fn deliver_selection<C: ClipboardSink>(clipboard: &mut C, path: PathBuf) -> Result<PathBuf> {
    clipboard.write_text(&path.to_string_lossy())?;
    Ok(path)
}

/// Draw, wait for an event, handle it; until the user quits or confirms.
fn event_loop<C: ClipboardSink>(
    tui: &mut Tui,
    start_dir: &Path,
    theme: &ThemeColors,
    quick_step: usize,
    clipboard: &mut C,
) -> Result<Option<PathBuf>> {
    let mut app = App::new(FsSource, start_dir, tui.usable_height()?)?.with_quick_step(quick_step);
    let mut events = EventSource;

    loop {
        tui.terminal_mut().draw(|frame| ui::render(&app, theme, frame))?;

        match events.next()? {
            Event::Key(key) => match handler::handle_key_event(&mut app, key)? {
                Outcome::Continue => {}
                Outcome::Quit => {
                    info!("quit");
                    return Ok(None);
                }
                Outcome::Confirm(path) => return deliver_selection(clipboard, path).map(Some),
            },
            Event::Resize(_, height) => {
                app.set_usable_height(height.saturating_sub(1) as usize);
                app.refresh()?;
                tui.sync()?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::clipboard::MemoryClipboard;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn start_dir_defaults_to_cwd() {
        let dir = resolve_start_dir(None).unwrap();
        assert_eq!(dir, paths::absolute(&std::env::current_dir().unwrap()).unwrap());
    }

    #[test]
    fn start_dir_from_file_uses_parent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        File::create(&file).unwrap();
        let resolved = resolve_start_dir(Some(&file)).unwrap();
        assert_eq!(resolved, paths::clean(dir.path()));
    }

    #[test]
    fn start_dir_missing_is_invalid_path() {
        let dir = TempDir::new().unwrap();
        let err = resolve_start_dir(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn delivered_path_is_copied() {
        let mut clipboard = MemoryClipboard::default();
        let path = deliver_selection(&mut clipboard, PathBuf::from("/tmp/a.txt")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/a.txt"));
        assert_eq!(clipboard.contents.as_deref(), Some("/tmp/a.txt"));
    }

    #[test]
    fn clipboard_failure_withholds_path() {
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let result = deliver_selection(&mut clipboard, PathBuf::from("/tmp/a.txt"));
        assert!(matches!(result, Err(AppError::Clipboard(_))));
    }

    #[test]
    fn cli_accepts_single_directory() {
        let cli = Cli::try_parse_from(["tpick", "/tmp"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("/tmp")]);
    }

    #[test]
    fn extra_arguments_print_usage() {
        assert!(matches!(classify(["tpick", "a", "b"]), Invocation::Usage));
    }

    #[test]
    fn unknown_flag_prints_usage() {
        assert!(matches!(classify(["tpick", "-x"]), Invocation::Usage));
        assert!(matches!(classify(["tpick", "--nope", "/tmp"]), Invocation::Usage));
    }

    #[test]
    fn help_and_version_are_left_to_clap() {
        assert!(matches!(classify(["tpick", "--help"]), Invocation::Info(_)));
        assert!(matches!(classify(["tpick", "-V"]), Invocation::Info(_)));
    }

    #[test]
    fn single_path_runs() {
        match classify(["tpick", "/tmp"]) {
            Invocation::Run(cli) => assert_eq!(cli.paths, vec![PathBuf::from("/tmp")]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
